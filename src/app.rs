use eframe::egui;

use crate::data::loader;
use crate::state::{AppState, Theme, View};
use crate::ui::{panels, table};

/// Key under which the theme preference is persisted.
const THEME_STORAGE_KEY: &str = "peerboard.theme";

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct PeerboardApp {
    pub state: AppState,
}

impl PeerboardApp {
    /// Load the bundled datasets and the persisted theme preference.
    pub fn new(cc: &eframe::CreationContext<'_>) -> anyhow::Result<Self> {
        let (data_2025, data_2026) = loader::load_bundled()?;
        log::info!(
            "Loaded bundled datasets: {} records (2025), {} records (2026)",
            data_2025.len(),
            data_2026.len()
        );

        let theme = cc
            .storage
            .and_then(|storage| storage.get_string(THEME_STORAGE_KEY))
            .as_deref()
            .and_then(Theme::from_storage_value)
            .unwrap_or(Theme::Dark);

        Ok(PeerboardApp {
            state: AppState::new(data_2025, data_2026, theme),
        })
    }

    fn apply_theme(&self, ctx: &egui::Context) {
        ctx.set_visuals(match self.state.theme {
            Theme::Dark => egui::Visuals::dark(),
            Theme::Light => egui::Visuals::light(),
        });
    }
}

impl eframe::App for PeerboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_theme(ctx);

        // ---- Top panel: views, year, theme ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters (not used by the comparison view,
        // which always spans both full datasets) ----
        if self.state.view != View::Comparison {
            egui::SidePanel::left("filter_panel")
                .default_width(220.0)
                .resizable(true)
                .show(ctx, |ui| {
                    panels::side_panel(ui, &mut self.state);
                });
        }

        // ---- Central panel: the routed view ----
        egui::CentralPanel::default().show(ctx, |ui| match self.state.view {
            View::Data => table::data_view(ui, &mut self.state),
            View::Comparison => panels::comparison_view(ui, &mut self.state),
            View::Statistics => panels::statistics_view(ui, &mut self.state),
        });
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        storage.set_string(
            THEME_STORAGE_KEY,
            self.state.theme.storage_value().to_string(),
        );
    }
}
