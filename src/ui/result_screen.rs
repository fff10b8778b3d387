// SPDX-License-Identifier: MPL-2.0
//! Result detection screen.
//!
//! [`ResultPresenter`] resolves the image locator it was handed and shows it
//! next to the detection label. A failed resolution only replaces the image
//! area with a placeholder; the label and the back button keep working.

use crate::error::ImageResolutionError;
use crate::i18n::fluent::I18n;
use crate::media::{loader, ImageData, ImageLocator};
use crate::ui::design_tokens::{palette, radius, sizing, spacing, typography};
use iced::{
    alignment::Horizontal,
    widget::{button, container, image, text, Column, Container},
    Border, Element, Length, Task, Theme,
};

/// Label shown for every photo. There is no classifier behind it.
pub const DETECTION_LABEL: &str = "Penyu Hijau";

/// What the image area currently shows.
#[derive(Debug, Clone)]
pub enum ImageArea {
    Loading,
    Ready(ImageData),
    Unavailable(ImageResolutionError),
}

#[derive(Debug, Clone)]
pub enum Message {
    Back,
    ImageResolved {
        locator: ImageLocator,
        result: Result<ImageData, ImageResolutionError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    None,
    /// Forwarded to the navigator as a back navigation.
    Back,
    /// The image could not be shown.
    ImageUnavailable {
        locator: ImageLocator,
        error: ImageResolutionError,
    },
}

#[derive(Debug, Default)]
pub struct ResultPresenter {
    locator: Option<ImageLocator>,
    image: Option<ImageArea>,
}

impl ResultPresenter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts resolving `locator`.
    ///
    /// Returns `None` when `locator` is already presented, so presenting the
    /// same image twice while the screen stays up triggers one load.
    pub fn present(&mut self, locator: &ImageLocator) -> Option<Task<Message>> {
        if self.locator.as_ref() == Some(locator) {
            return None;
        }

        tracing::debug!(%locator, "resolving result image");
        self.locator = Some(locator.clone());
        self.image = Some(ImageArea::Loading);

        let locator = locator.clone();
        Some(Task::perform(loader::resolve(locator.clone()), move |result| {
            Message::ImageResolved { locator, result }
        }))
    }

    /// Forgets the presented image. The next [`present`](Self::present)
    /// loads again, even for the same locator.
    pub fn clear(&mut self) {
        self.locator = None;
        self.image = None;
    }

    /// The locator being presented.
    #[must_use]
    pub fn locator(&self) -> Option<&ImageLocator> {
        self.locator.as_ref()
    }

    #[must_use]
    pub fn image(&self) -> Option<&ImageArea> {
        self.image.as_ref()
    }

    pub fn update(&mut self, message: Message) -> Event {
        match message {
            Message::Back => self.go_back(),
            Message::ImageResolved { locator, result } => self.on_resolved(locator, result),
        }
    }

    /// Emits the back event. The presenter is cleared once the screen is
    /// actually left.
    #[must_use]
    pub fn go_back(&self) -> Event {
        Event::Back
    }

    fn on_resolved(
        &mut self,
        locator: ImageLocator,
        result: Result<ImageData, ImageResolutionError>,
    ) -> Event {
        if self.locator.as_ref() != Some(&locator) {
            tracing::debug!(%locator, "dropping resolution for a locator no longer presented");
            return Event::None;
        }

        match result {
            Ok(data) => {
                self.image = Some(ImageArea::Ready(data));
                Event::None
            }
            Err(error) => {
                tracing::warn!(%locator, %error, "result image unavailable");
                self.image = Some(ImageArea::Unavailable(error.clone()));
                Event::ImageUnavailable { locator, error }
            }
        }
    }

    #[must_use]
    pub fn view<'a>(&'a self, i18n: &'a I18n) -> Element<'a, Message> {
        let back = button(text(format!("← {}", i18n.tr("result-back")))).on_press(Message::Back);

        let label = text(i18n.tr_with_args("result-detection-label", &[("label", DETECTION_LABEL)]))
            .size(typography::TITLE_MD);

        let content = Column::new()
            .spacing(spacing::LG)
            .padding(spacing::MD)
            .align_x(Horizontal::Center)
            .width(Length::Fill)
            .push(Container::new(back).width(Length::Fill))
            .push(text(i18n.tr("result-title")).size(typography::TITLE_LG))
            .push(self.view_image(i18n))
            .push(label);

        iced::widget::scrollable(content).into()
    }

    fn view_image<'a>(&'a self, i18n: &'a I18n) -> Element<'a, Message> {
        let inner: Element<'a, Message> = match &self.image {
            Some(ImageArea::Ready(data)) => image(data.handle.clone())
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
            Some(ImageArea::Unavailable(error)) => Column::new()
                .spacing(spacing::XS)
                .align_x(Horizontal::Center)
                .push(text(i18n.tr("result-image-unavailable")).size(typography::BODY_LG))
                .push(text(i18n.tr(error.i18n_key())).size(typography::CAPTION))
                .into(),
            Some(ImageArea::Loading) | None => text(i18n.tr("result-image-loading")).into(),
        };

        Container::new(inner)
            .center_x(Length::Fixed(sizing::RESULT_IMAGE_MAX))
            .center_y(Length::Fixed(sizing::RESULT_IMAGE_MAX))
            .style(|theme: &Theme| container::Style {
                background: Some(theme.extended_palette().background.weak.color.into()),
                border: Border {
                    radius: radius::MD.into(),
                    width: 1.0,
                    color: palette::GRAY_400,
                },
                ..Default::default()
            })
            .into()
    }
}
