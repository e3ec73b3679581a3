//! Main window: profile table, action bar, status line.
//!
//! All state lives in [`FoxdeskApp`]; the row list is discarded and rebuilt
//! wholesale on every refresh. The single UI thread drives every operation
//! synchronously except `open`, which runs on a detached worker so the
//! browser window the script launches does not block this one.

use eframe::egui;

use foxdesk_core::{FoxdeskError, Launcher, ProfileForm, ProfileRow, Result};

use crate::dialog::{DialogAction, DialogMode, ProfileDialog};

pub fn run(launcher: Launcher) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 600.0])
            .with_min_inner_size([500.0, 350.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Camoufox Profile Manager",
        options,
        Box::new(|cc| Ok(Box::new(FoxdeskApp::new(cc, launcher)))),
    )
    .map_err(|e| FoxdeskError::Gui(e.to_string()))?;

    Ok(())
}

enum StatusKind {
    Success,
    Error,
    Info,
}

struct FoxdeskApp {
    launcher: Launcher,
    rows: Vec<ProfileRow>,
    selected: Option<String>,
    status: Option<(String, StatusKind)>,
    dialog: Option<ProfileDialog>,
    pending_delete: Option<ProfileRow>,
}

impl FoxdeskApp {
    fn new(_cc: &eframe::CreationContext<'_>, launcher: Launcher) -> Self {
        let mut app = Self {
            launcher,
            rows: Vec::new(),
            selected: None,
            status: None,
            dialog: None,
            pending_delete: None,
        };
        app.refresh();
        app
    }

    /// Rebuild the row list from `list --json`.
    ///
    /// On any failure the previous rows stay on screen untouched. Returns
    /// whether the refresh succeeded so callers can layer their own status
    /// message over the default "Loaded N profiles".
    fn refresh(&mut self) -> bool {
        match self.launcher.list_profiles() {
            Ok(rows) => {
                if let Some(selected) = &self.selected {
                    if !rows.iter().any(|r| &r.id == selected) {
                        self.selected = None;
                    }
                }
                self.status = Some((
                    format!("Loaded {} profiles", rows.len()),
                    StatusKind::Info,
                ));
                self.rows = rows;
                true
            }
            Err(e) => {
                log::error!("refresh failed: {}", e);
                self.status = Some((e.to_string(), StatusKind::Error));
                false
            }
        }
    }

    fn selected_row(&self) -> Option<&ProfileRow> {
        self.selected
            .as_ref()
            .and_then(|id| self.rows.iter().find(|r| &r.id == id))
    }

    fn warn_no_selection(&mut self) {
        self.status = Some(("Select a profile first".to_string(), StatusKind::Info));
    }

    fn start_edit(&mut self) {
        match self.selected_row().cloned() {
            Some(row) => self.dialog = Some(ProfileDialog::edit(&row)),
            None => self.warn_no_selection(),
        }
    }

    fn start_delete(&mut self) {
        match self.selected_row().cloned() {
            Some(row) => self.pending_delete = Some(row),
            None => self.warn_no_selection(),
        }
    }

    fn submit_form(&mut self, mode: &DialogMode, form: ProfileForm) {
        let result = match mode {
            DialogMode::Create => self.launcher.create_profile(&form),
            DialogMode::Edit { id, .. } => self.launcher.edit_profile(id, &form),
        };

        match result {
            Ok(()) => {
                let message = match mode {
                    DialogMode::Create => format!("Profile '{}' created", form.name),
                    DialogMode::Edit { name, .. } => format!("Profile '{}' updated", name),
                };
                log::info!("{}", message);
                if self.refresh() {
                    self.status = Some((message, StatusKind::Success));
                }
            }
            Err(e) => {
                let op = match mode {
                    DialogMode::Create => "create",
                    DialogMode::Edit { .. } => "edit",
                };
                log::error!("{} failed: {}", op, e);
                self.status = Some((e.to_string(), StatusKind::Error));
            }
        }
    }

    fn delete(&mut self, row: &ProfileRow, remove_storage: bool) {
        match self.launcher.delete_profile(&row.id, remove_storage) {
            Ok(()) => {
                let message = if remove_storage {
                    format!("Profile '{}' and its storage deleted", row.name)
                } else {
                    format!("Profile '{}' deleted (storage kept)", row.name)
                };
                log::info!("{}", message);
                if self.refresh() {
                    self.status = Some((message, StatusKind::Success));
                }
            }
            Err(e) => {
                log::error!("delete failed: {}", e);
                self.status = Some((e.to_string(), StatusKind::Error));
            }
        }
    }

    /// Launch the profile's browser on a detached worker.
    ///
    /// Fire-and-forget: nothing is awaited and the list is not refreshed,
    /// since opening does not mutate it. The script's status text goes to
    /// the log.
    fn open_selected(&mut self) {
        let row = match self.selected_row().cloned() {
            Some(row) => row,
            None => {
                self.warn_no_selection();
                return;
            }
        };

        let launcher = self.launcher.clone();
        let (id, name) = (row.id, row.name);
        self.status = Some((
            format!("Opening profile '{}' for manual login...", name),
            StatusKind::Info,
        ));

        std::thread::spawn(move || match launcher.open_profile(&id) {
            Ok(status) if !status.is_empty() => log::info!("open '{}': {}", name, status),
            Ok(_) => log::info!("open '{}': browser session ended", name),
            Err(e) => log::error!("open '{}': {}", name, e),
        });
    }

    fn show_dialog(&mut self, ctx: &egui::Context) {
        let mut finished: Option<(DialogMode, Option<ProfileForm>)> = None;

        if let Some(dialog) = &mut self.dialog {
            match dialog.show(ctx) {
                DialogAction::None => {}
                DialogAction::Cancel => finished = Some((dialog.mode().clone(), None)),
                DialogAction::Submit(form) => finished = Some((dialog.mode().clone(), Some(form))),
            }
        }

        if let Some((mode, form)) = finished {
            self.dialog = None;
            if let Some(form) = form {
                self.submit_form(&mode, form);
            }
        }
    }

    fn show_delete_confirmation(&mut self, ctx: &egui::Context) {
        let row = match &self.pending_delete {
            Some(row) => row.clone(),
            None => return,
        };

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.pending_delete = None;
            return;
        }

        // Some(Some(remove_storage)) confirms, Some(None) aborts.
        let mut decision: Option<Option<bool>> = None;

        egui::Window::new("Confirm Deletion")
            .collapsible(false)
            .resizable(false)
            .order(egui::Order::Foreground)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label(format!("Delete profile '{}'?", row.name));
                ui.add_space(8.0);

                if ui.button("Delete profile and storage directory").clicked() {
                    decision = Some(Some(true));
                }
                if ui.button("Delete profile, keep storage directory").clicked() {
                    decision = Some(Some(false));
                }
                ui.add_space(4.0);
                if ui.button("Cancel").clicked() {
                    decision = Some(None);
                }
            });

        match decision {
            Some(Some(remove_storage)) => {
                self.pending_delete = None;
                self.delete(&row, remove_storage);
            }
            Some(None) => self.pending_delete = None,
            None => {}
        }
    }

    fn show_table(&mut self, ui: &mut egui::Ui) {
        if self.rows.is_empty() {
            ui.add_space(24.0);
            ui.vertical_centered(|ui| {
                ui.label("No profiles found");
            });
            return;
        }

        egui::ScrollArea::vertical().show(ui, |ui| {
            egui::Grid::new("profiles_table")
                .num_columns(4)
                .striped(true)
                .spacing([16.0, 4.0])
                .show(ui, |ui| {
                    ui.strong("ID");
                    ui.strong("Name");
                    ui.strong("Storage Path");
                    ui.strong("Proxy");
                    ui.end_row();

                    let mut clicked = None;
                    for row in &self.rows {
                        let is_selected = self.selected.as_deref() == Some(row.id.as_str());
                        let cells = [
                            row.id.as_str(),
                            row.name.as_str(),
                            row.storage_path.as_str(),
                            row.proxy_label(),
                        ];
                        for cell in cells {
                            if ui.selectable_label(is_selected, cell).clicked() {
                                clicked = Some(row.id.clone());
                            }
                        }
                        ui.end_row();
                    }
                    if let Some(id) = clicked {
                        self.selected = Some(id);
                    }
                });
        });
    }
}

impl eframe::App for FoxdeskApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let modal_open = self.dialog.is_some() || self.pending_delete.is_some();

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.heading("Camoufox Profile Manager");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.add_enabled_ui(!modal_open, |ui| {
                        if ui.button("Refresh").clicked() {
                            self.refresh();
                        }
                        if ui.button("Open").clicked() {
                            self.open_selected();
                        }
                        if ui.button("Delete").clicked() {
                            self.start_delete();
                        }
                        if ui.button("Edit").clicked() {
                            self.start_edit();
                        }
                        if ui.button("Create").clicked() {
                            self.dialog = Some(ProfileDialog::create());
                        }
                    });
                });
            });
            ui.add_space(8.0);
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.add_space(4.0);
            let mut clear_status = false;
            match &self.status {
                Some((message, kind)) => {
                    let color = match kind {
                        StatusKind::Success => egui::Color32::GREEN,
                        StatusKind::Error => egui::Color32::RED,
                        StatusKind::Info => egui::Color32::LIGHT_BLUE,
                    };
                    ui.horizontal(|ui| {
                        ui.colored_label(color, message.clone());
                        if ui.small_button("x").clicked() {
                            clear_status = true;
                        }
                    });
                }
                None => {
                    ui.label("Ready");
                }
            }
            if clear_status {
                self.status = None;
            }
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(!modal_open, |ui| {
                self.show_table(ui);
            });
        });

        self.show_dialog(ctx);
        self.show_delete_confirmation(ctx);
    }
}
