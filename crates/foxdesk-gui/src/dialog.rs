//! Modal create/edit form for a single profile.

use eframe::egui;

use foxdesk_core::{ProfileForm, ProfileRow};

/// What the dialog was opened for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogMode {
    Create,
    Edit { id: String, name: String },
}

/// Result of rendering the dialog for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogAction {
    None,
    Submit(ProfileForm),
    Cancel,
}

pub struct ProfileDialog {
    mode: DialogMode,
    name: String,
    storage_path: String,
    proxy: String,
    validation_error: Option<String>,
}

impl ProfileDialog {
    pub fn create() -> Self {
        Self {
            mode: DialogMode::Create,
            name: String::new(),
            storage_path: String::new(),
            proxy: String::new(),
            validation_error: None,
        }
    }

    /// Open the form against an existing row.
    ///
    /// The storage field is blank for profiles at the default location, and
    /// the proxy field is always blank: the stored secret is never echoed
    /// back into a visible widget.
    pub fn edit(row: &ProfileRow) -> Self {
        let storage_path = if row.uses_default_storage() {
            String::new()
        } else {
            row.storage_path.clone()
        };

        Self {
            mode: DialogMode::Edit {
                id: row.id.clone(),
                name: row.name.clone(),
            },
            name: row.name.clone(),
            storage_path,
            proxy: String::new(),
            validation_error: None,
        }
    }

    pub fn mode(&self) -> &DialogMode {
        &self.mode
    }

    /// Render the modal and report what the user decided this frame.
    pub fn show(&mut self, ctx: &egui::Context) -> DialogAction {
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            return DialogAction::Cancel;
        }
        let submit_key = ctx.input(|i| i.key_pressed(egui::Key::Enter));

        let title = match &self.mode {
            DialogMode::Create => "Create New Profile",
            DialogMode::Edit { .. } => "Edit Profile",
        };

        let mut action = DialogAction::None;

        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .order(egui::Order::Foreground)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                egui::Grid::new("profile_form")
                    .num_columns(2)
                    .spacing([8.0, 8.0])
                    .show(ui, |ui| {
                        ui.label("Profile name:");
                        ui.text_edit_singleline(&mut self.name);
                        ui.end_row();

                        ui.label("Storage path:");
                        ui.horizontal(|ui| {
                            ui.text_edit_singleline(&mut self.storage_path);
                            if ui.button("Browse...").clicked() {
                                if let Some(path) = rfd::FileDialog::new().pick_folder() {
                                    self.storage_path = path.display().to_string();
                                }
                            }
                        });
                        ui.end_row();

                        ui.label("Proxy:");
                        ui.add(egui::TextEdit::singleline(&mut self.proxy).password(true));
                        ui.end_row();
                    });

                ui.add_space(4.0);
                ui.label(
                    egui::RichText::new(
                        "Storage path is optional; leave empty for the default location.\n\
                         Proxy format: host:port:username:password",
                    )
                    .small()
                    .weak(),
                );

                if let Some(error) = &self.validation_error {
                    ui.add_space(4.0);
                    ui.colored_label(egui::Color32::RED, error);
                }

                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("OK").clicked() || submit_key {
                        action = self.try_submit();
                    }
                    if ui.button("Cancel").clicked() {
                        action = DialogAction::Cancel;
                    }
                });
            });

        action
    }

    /// Validate and build the form result.
    ///
    /// An empty name blocks submission and keeps the dialog open; nothing
    /// is invoked until the form is valid.
    fn try_submit(&mut self) -> DialogAction {
        let name = self.name.trim();
        if name.is_empty() {
            self.validation_error = Some("Profile name is required".to_string());
            return DialogAction::None;
        }

        DialogAction::Submit(ProfileForm {
            name: name.to_string(),
            storage_path: self.storage_path.trim().to_string(),
            proxy: self.proxy.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(storage_path: &str) -> ProfileRow {
        ProfileRow {
            id: "p1".to_string(),
            name: "work".to_string(),
            storage_path: storage_path.to_string(),
            proxy_present: true,
        }
    }

    #[test]
    fn edit_never_prefills_the_proxy() {
        let dialog = ProfileDialog::edit(&row("/data/work"));
        assert!(dialog.proxy.is_empty());
    }

    #[test]
    fn edit_prefills_name_and_explicit_storage() {
        let dialog = ProfileDialog::edit(&row("/data/work"));
        assert_eq!(dialog.name, "work");
        assert_eq!(dialog.storage_path, "/data/work");
    }

    #[test]
    fn edit_blanks_the_default_storage_sentinel() {
        let dialog = ProfileDialog::edit(&row("default"));
        assert!(dialog.storage_path.is_empty());
    }

    #[test]
    fn blank_name_blocks_submission() {
        let mut dialog = ProfileDialog::create();
        dialog.name = "   ".to_string();

        assert_eq!(dialog.try_submit(), DialogAction::None);
        assert!(dialog.validation_error.is_some());
    }

    #[test]
    fn submission_trims_all_fields() {
        let mut dialog = ProfileDialog::create();
        dialog.name = "  work  ".to_string();
        dialog.storage_path = " /data/work ".to_string();
        dialog.proxy = " 1.2.3.4:8080:u:p ".to_string();

        match dialog.try_submit() {
            DialogAction::Submit(form) => {
                assert_eq!(form.name, "work");
                assert_eq!(form.storage_path, "/data/work");
                assert_eq!(form.proxy, "1.2.3.4:8080:u:p");
            }
            other => panic!("expected submit, got {:?}", other),
        }
    }
}
