use std::sync::Arc;

use eframe::egui::{self, Color32, FontId, RichText, Rounding, Stroke};
use eframe::egui::text::LayoutJob;
use newsgrid_core::{
    search, Card, NewsFetcher, SearchView, ThemeConfig, UiConfig, COLUMN_COUNT, READ_MORE_LABEL,
};
use tokio::runtime::Runtime;
use tokio::sync::oneshot;
use tracing::{info, warn};

const SEARCH_LABEL: &str = "テスラニュース検索";
const SEARCH_BUTTON: &str = "検索";

pub struct AppInit {
    pub runtime: Arc<Runtime>,
    pub fetcher: NewsFetcher,
    pub ui: UiConfig,
    pub theme: ThemeConfig,
}

pub struct NewsGridApp {
    runtime: Arc<Runtime>,
    fetcher: NewsFetcher,
    ui_config: UiConfig,
    theme: ThemeConfig,
    query: String,
    view: SearchView,
    // Result of the search currently running on the runtime, if any.
    pending: Option<oneshot::Receiver<SearchView>>,
}

impl NewsGridApp {
    pub fn new(init: AppInit, ctx: &egui::Context) -> Self {
        let mut app = Self {
            runtime: init.runtime,
            fetcher: init.fetcher,
            query: init.ui.default_query.clone(),
            ui_config: init.ui,
            theme: init.theme,
            view: SearchView::Prompt,
            pending: None,
        };
        // The default query is searched right away, like any submitted one.
        app.run_search(ctx);
        app
    }

    /// Starts a search on the runtime and shows the loading state until
    /// [`Self::poll_pending`] picks up the result. A newer search replaces
    /// the receiver of an older one, whose result is then discarded.
    fn run_search(&mut self, ctx: &egui::Context) {
        self.view = SearchView::pending(&self.query);
        if !matches!(self.view, SearchView::Loading { .. }) {
            self.pending = None;
            return;
        }

        let (tx, rx) = oneshot::channel();
        let fetcher = self.fetcher.clone();
        let query = self.query.clone();
        let ctx = ctx.clone();
        self.runtime.spawn(async move {
            let view = search(&fetcher, &query).await;
            info!(%query, cards = view.card_count(), "search rendered");
            let _ = tx.send(view);
            ctx.request_repaint();
        });
        self.pending = Some(rx);
    }

    fn poll_pending(&mut self) {
        let Some(rx) = self.pending.as_mut() else {
            return;
        };
        match rx.try_recv() {
            Ok(view) => {
                self.view = view;
                self.pending = None;
            }
            Err(oneshot::error::TryRecvError::Empty) => {}
            Err(oneshot::error::TryRecvError::Closed) => {
                warn!("search task ended without a result");
                if let SearchView::Loading { query } = &self.view {
                    self.view = SearchView::NoResults {
                        query: query.clone(),
                    };
                }
                self.pending = None;
            }
        }
    }

    fn setup_light_theme(&self, ctx: &egui::Context) {
        let theme = &self.theme;
        let mut style = (*ctx.style()).clone();

        style.visuals = egui::Visuals::light();
        style.visuals.panel_fill = theme.background_color32();
        style.visuals.window_fill = theme.background_color32();
        style.visuals.extreme_bg_color = theme.card_color32();
        style.visuals.override_text_color = Some(theme.text_color32());

        style.visuals.widgets.inactive.bg_stroke = Stroke::new(2.0, theme.accent_color32());
        style.visuals.widgets.hovered.bg_stroke = Stroke::new(2.0, theme.focus_color32());
        style.visuals.widgets.active.bg_stroke = Stroke::new(2.0, theme.focus_color32());
        style.visuals.selection.stroke = Stroke::new(2.0, theme.focus_color32());

        style.spacing.item_spacing = egui::vec2(20.0, 8.0);
        style.spacing.button_padding = egui::vec2(10.0, 6.0);
        style.spacing.interact_size = egui::vec2(36.0, 28.0);
        for font in style.text_styles.values_mut() {
            if font.size < self.ui_config.font_size {
                font.size = self.ui_config.font_size;
            }
        }
        ctx.set_style(style);
    }

    fn draw_search_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("search_panel")
            .frame(
                egui::Frame::none()
                    .fill(self.theme.background_color32())
                    .inner_margin(egui::Margin::symmetric(24.0, 16.0)),
            )
            .show(ctx, |ui| {
                ui.label(RichText::new(SEARCH_LABEL).size(24.0).strong());
                ui.add_space(4.0);
                ui.horizontal(|ui| {
                    let width = (ui.available_width() - 120.0).max(200.0);
                    let response = ui.add(
                        egui::TextEdit::singleline(&mut self.query)
                            .desired_width(width)
                            .margin(egui::vec2(10.0, 10.0)),
                    );
                    let submitted =
                        response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                    let clicked = ui.button(SEARCH_BUTTON).clicked();
                    if submitted || clicked {
                        self.run_search(ui.ctx());
                    } else if response.changed() && self.query.trim().is_empty() {
                        self.view = SearchView::Prompt;
                        self.pending = None;
                    }
                });
            });
    }

    fn draw_results(&self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(
                egui::Frame::none()
                    .fill(self.theme.background_color32())
                    .inner_margin(egui::Margin::symmetric(24.0, 8.0)),
            )
            .show(ctx, |ui| match &self.view {
                SearchView::Prompt | SearchView::Loading { .. } => {
                    self.draw_notice(ui, Color32::from_rgb(225, 236, 250), &self.view);
                }
                SearchView::NoResults { .. } => {
                    self.draw_notice(ui, Color32::from_rgb(255, 244, 214), &self.view);
                }
                SearchView::Grid { columns, .. } => {
                    egui::ScrollArea::vertical()
                        .auto_shrink([false, false])
                        .show(ui, |ui| {
                            ui.columns(COLUMN_COUNT, |column_uis| {
                                for (ui, cards) in column_uis.iter_mut().zip(columns) {
                                    for card in cards {
                                        self.draw_card(ui, card);
                                    }
                                }
                            });
                        });
                }
            });
    }

    fn draw_notice(&self, ui: &mut egui::Ui, fill: Color32, view: &SearchView) {
        let Some(message) = view.message() else {
            return;
        };
        egui::Frame::none()
            .fill(fill)
            .rounding(Rounding::same(4.0))
            .inner_margin(egui::Margin::same(16.0))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    if matches!(view, SearchView::Loading { .. }) {
                        ui.spinner();
                    }
                    ui.label(RichText::new(message).size(15.0));
                });
            });
    }

    fn draw_card(&self, ui: &mut egui::Ui, card: &Card) {
        let theme = &self.theme;
        let inner = egui::Frame::none()
            .fill(theme.card_color32())
            .rounding(Rounding::same(4.0))
            .inner_margin(egui::Margin::same(24.0))
            .stroke(Stroke::new(1.0, theme.border_color32()))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(
                    RichText::new(&card.date)
                        .size(11.0)
                        .color(theme.secondary_text_color32()),
                );
                ui.add_space(6.0);
                ui.add(
                    egui::Label::new(
                        RichText::new(&card.title)
                            .size(18.0)
                            .strong()
                            .color(theme.text_color32()),
                    )
                    .wrap(true),
                );
                if !card.summary.is_empty() {
                    ui.add_space(10.0);
                    let summary = self.clamped_summary(ui, &card.summary);
                    ui.add(egui::Label::new(summary));
                }
                ui.add_space(10.0);
                egui::Frame::none()
                    .fill(theme.accent_color32())
                    .rounding(Rounding::same(2.0))
                    .inner_margin(egui::Margin::symmetric(14.0, 6.0))
                    .show(ui, |ui| {
                        ui.label(
                            RichText::new(READ_MORE_LABEL)
                                .size(11.0)
                                .strong()
                                .color(Color32::WHITE),
                        );
                    });
            });

        let response = inner.response.interact(egui::Sense::click());
        if card.is_navigable() {
            if response.hovered() {
                ui.painter().rect_stroke(
                    response.rect,
                    Rounding::same(4.0),
                    Stroke::new(1.0, theme.accent_color32()),
                );
            }
            let response = response
                .on_hover_cursor(egui::CursorIcon::PointingHand)
                .on_hover_text(&card.link);
            if response.clicked() {
                open_link(&card.link);
            }
        }
        ui.add_space(20.0);
    }

    /// Summary laid out to at most `summary_rows` rows, ending in an
    /// ellipsis when cut. The text itself is left whole.
    fn clamped_summary(&self, ui: &egui::Ui, summary: &str) -> LayoutJob {
        let mut job = LayoutJob::simple(
            summary.to_owned(),
            FontId::proportional(14.0),
            Color32::from_rgb(85, 85, 85),
            ui.available_width(),
        );
        job.wrap.max_rows = self.ui_config.summary_rows.max(1);
        // Japanese text has no spaces to break on.
        job.wrap.break_anywhere = true;
        job.wrap.overflow_character = Some('…');
        job
    }
}

fn open_link(link: &str) {
    if let Err(err) = webbrowser::open(link) {
        warn!(%link, error = %err, "failed to open link in browser");
    }
}

impl eframe::App for NewsGridApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.setup_light_theme(ctx);
        self.poll_pending();
        self.draw_search_bar(ctx);
        self.draw_results(ctx);
    }
}
