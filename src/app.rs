use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local};
use iced::{
    Alignment, Border, Color, Length, Shadow, Subscription, Task, Theme, Vector,
    widget::{
        Space, button,
        canvas::{Cache, Canvas},
        center, column, container, mouse_area, pick_list, row, stack, text,
    },
};
use skyline_cockpit::{
    api::CockpitApiClient,
    config::AppConfig,
    controller::{DashboardController, LoadOutcome},
    page::{PageModel, PageSnapshot},
    report::OperationCategory,
    schedule::RefreshScheduler,
    style,
    traits::Element,
    widgets::gauge::UtilizationGauge,
};

const PLACEHOLDER: &str = "--:--";

#[derive(Debug, Clone)]
pub enum Message {
    CatalogLoaded,
    DateSelected(String),
    RefreshTick,
    ReportLoaded(Option<LoadOutcome>),
    MenuToggled,
    OutsideClicked,
}

pub struct CockpitApp {
    controller: DashboardController<PageModel>,
    scheduler: RefreshScheduler<PageModel>,
    page: PageModel,
    config: Arc<AppConfig>,
    gauge_cache: Cache,
    last_update: Option<DateTime<Local>>,
}

impl CockpitApp {
    pub fn new(api: CockpitApiClient, config: Arc<AppConfig>) -> (Self, Task<Message>) {
        let page = PageModel::new();
        let controller =
            DashboardController::new(api, page.clone(), config.refresh.request_fencing);
        let scheduler = RefreshScheduler::new(
            controller.clone(),
            Duration::from_secs(config.refresh.interval_secs),
        );

        let initial = {
            let controller = controller.clone();
            Task::perform(
                async move { controller.load_available_dates().await },
                |_| Message::CatalogLoaded,
            )
        };

        let app = Self {
            controller,
            scheduler,
            page,
            config,
            gauge_cache: Cache::new(),
            last_update: None,
        };

        (app, initial)
    }

    pub fn title(&self) -> String {
        self.config.window.title.clone()
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::CatalogLoaded => {
                if self.controller.selected_date().is_some() {
                    self.last_update = Some(Local::now());
                }
                self.gauge_cache.clear();
                Task::none()
            }
            Message::DateSelected(date) => {
                let controller = self.controller.clone();
                Task::perform(
                    async move { Some(controller.select_date(&date).await) },
                    Message::ReportLoaded,
                )
            }
            Message::RefreshTick => {
                let scheduler = self.scheduler.clone();
                Task::perform(async move { scheduler.tick().await }, Message::ReportLoaded)
            }
            Message::ReportLoaded(outcome) => {
                if outcome == Some(LoadOutcome::Applied) {
                    self.last_update = Some(Local::now());
                }
                self.gauge_cache.clear();
                Task::none()
            }
            Message::MenuToggled => {
                self.controller.toggle_menu();
                Task::none()
            }
            Message::OutsideClicked => {
                self.controller.dismiss_menu();
                Task::none()
            }
        }
    }

    pub fn view(&self) -> iced::Element<'_, Message> {
        let page = self.page.snapshot();

        let dashboard = container(column![
            self.view_header(&page),
            Space::new().height(24),
            view_times(&page),
            Space::new().height(24),
            row![self.view_utilization(&page), view_operations(&page)]
                .spacing(24)
                .height(Length::Fill),
        ])
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(30)
        .style(|_| container::Style {
            background: Some(style::BG_DARK.into()),
            ..Default::default()
        });

        // Any click not captured by a control closes the menu
        let base = mouse_area(dashboard).on_press(Message::OutsideClicked);

        if page.is_visible(Element::MenuPanel) {
            stack![
                base,
                container(self.view_menu())
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .padding([80, 30])
            ]
            .into()
        } else {
            base.into()
        }
    }

    pub fn subscription(&self) -> Subscription<Message> {
        iced::time::every(self.scheduler.period()).map(|_| Message::RefreshTick)
    }

    pub fn theme(&self) -> Theme {
        Theme::Dark
    }

    // --- VIEW COMPONENTS ---

    fn view_header(&self, page: &PageSnapshot) -> iced::Element<'_, Message> {
        let menu_toggle: iced::Element<'_, Message> = if page.has(Element::MenuToggle) {
            button(text("☰").size(18))
                .on_press(Message::MenuToggled)
                .padding(10)
                .style(|_, _| button::Style {
                    background: Some(style::BG_CARD.into()),
                    text_color: style::TEXT_BRIGHT,
                    border: Border {
                        radius: 8.0.into(),
                        ..Default::default()
                    },
                    ..Default::default()
                })
                .into()
        } else {
            Space::new().width(0).into()
        };

        let status = if page.is_visible(Element::LoadingIndicator) {
            text("Loading...").size(14).color(style::ACCENT_BLUE)
        } else {
            let last_update = self
                .last_update
                .map(|t| t.format("%H:%M:%S").to_string())
                .unwrap_or_else(|| "--:--:--".to_string());
            text(format!("Last Update: {}", last_update))
                .size(14)
                .color(style::TEXT_MUTED)
        };

        let selector: iced::Element<'_, Message> = if page.has(Element::DateSelector) {
            pick_list(
                page.options(Element::DateSelector).to_vec(),
                page.selected(Element::DateSelector).map(str::to_string),
                Message::DateSelected,
            )
            .placeholder("No dates")
            .padding(8)
            .into()
        } else {
            Space::new().width(0).into()
        };

        row![
            menu_toggle,
            Space::new().width(14),
            text(self.title()).size(28).color(style::TEXT_BRIGHT),
            Space::new().width(Length::Fill),
            status,
            Space::new().width(14),
            selector
        ]
        .align_y(Alignment::Center)
        .into()
    }

    fn view_utilization(&self, page: &PageSnapshot) -> iced::Element<'_, Message> {
        let label = match page.text(Element::UtilizationText) {
            "" => "--%".to_string(),
            value => value.to_string(),
        };

        let gauge = Canvas::new(UtilizationGauge {
            percent: page.fill(Element::UtilizationGauge),
            label,
            cache: &self.gauge_cache,
        })
        .width(Length::Fixed(240.0))
        .height(Length::Fixed(240.0));

        card_container(column![
            text("Utilization").size(16).color(style::TEXT_MUTED),
            Space::new().height(10),
            center(gauge)
        ])
        .width(Length::FillPortion(1))
        .into()
    }

    fn view_menu(&self) -> iced::Element<'_, Message> {
        let fencing = if self.controller.request_fencing() {
            "on"
        } else {
            "off"
        };

        card_container(
            column![
                text("Skyline Cockpit").size(16).color(style::TEXT_BRIGHT),
                text(format!("Backend: {}", self.config.server.base_url))
                    .size(13)
                    .color(style::TEXT_MUTED),
                text(format!(
                    "Refresh: every {}s",
                    self.scheduler.period().as_secs()
                ))
                .size(13)
                .color(style::TEXT_MUTED),
                text(format!("Request fencing: {}", fencing))
                    .size(13)
                    .color(style::TEXT_MUTED),
            ]
            .spacing(8),
        )
        .max_width(320)
        .into()
    }
}

fn view_times(page: &PageSnapshot) -> iced::Element<'static, Message> {
    let cards = [
        ("Start Time", Element::StartTime),
        ("End Time", Element::EndTime),
        ("Working Hours", Element::WorkingHours),
        ("Utilized Hours", Element::UtilizedHours),
    ]
    .into_iter()
    .filter(|(_, element)| page.has(*element))
    .map(|(label, element)| -> iced::Element<'static, Message> {
        card_container(column![
            text(label).size(13).color(style::TEXT_MUTED),
            Space::new().height(6),
            text(value_or_placeholder(page.text(element)))
                .size(30)
                .color(style::TEXT_BRIGHT),
        ])
        .width(Length::Fill)
        .into()
    });

    row(cards).spacing(16).into()
}

fn view_operations(page: &PageSnapshot) -> iced::Element<'static, Message> {
    let cells = OperationCategory::ALL
        .into_iter()
        .filter(|category| page.has(Element::Operation(*category)))
        .map(|category| -> iced::Element<'static, Message> {
            row![
                text(category.label()).size(15).color(style::TEXT_MUTED),
                Space::new().width(Length::Fill),
                text(value_or_placeholder(
                    page.text(Element::Operation(category))
                ))
                .size(22)
                .color(style::ACCENT_ORANGE),
            ]
            .align_y(Alignment::Center)
            .into()
        });

    card_container(column![
        text("Operations Breakdown").size(16).color(style::TEXT_MUTED),
        Space::new().height(16),
        column(cells).spacing(18),
    ])
    .width(Length::FillPortion(1))
    .into()
}

fn value_or_placeholder(value: &str) -> String {
    if value.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        value.to_string()
    }
}

fn card_container<'a>(
    content: impl Into<iced::Element<'a, Message>>,
) -> container::Container<'a, Message> {
    container(content).padding(24).style(|_| container::Style {
        background: Some(style::BG_CARD.into()),
        border: Border {
            color: Color::TRANSPARENT,
            width: 0.0,
            radius: 16.0.into(),
        },
        shadow: Shadow {
            color: Color::from_rgba(0.0, 0.0, 0.0, 0.3),
            offset: Vector::new(0.0, 4.0),
            blur_radius: 10.0,
        },
        ..Default::default()
    })
}
