//! Image slider used by gallery blocks.
//!
//! The markup is inert without `static/js/carousel.js`, which wires up the
//! arrows, the thumbnail strip and the slide counter.

use maud::{html, Markup, PreEscaped, Render};

use super::media::DEFAULT_ALT;
use crate::cms::ResolvedImage;

const ARROW_PREV: &str = r#"<svg viewBox="0 0 24 24" xmlns="http://www.w3.org/2000/svg"><path d="M15.41 7.41L14 6l-6 6 6 6 1.41-1.41L10.83 12z"/></svg>"#;
const ARROW_NEXT: &str = r#"<svg viewBox="0 0 24 24" xmlns="http://www.w3.org/2000/svg"><path d="M10 6L8.59 7.41 13.17 12l-4.58 4.59L10 18l6-6z"/></svg>"#;

/// Slides eagerly loaded before the rest fall back to `loading="lazy"`.
const EAGER_SLIDES: usize = 3;

/// A slider over resolved images. Renders nothing for an empty list.
#[derive(Debug, Clone)]
pub struct Carousel<'a> {
    /// Suffixed onto `carousel-` to form the element id.
    pub id: &'a str,
    pub images: &'a [ResolvedImage],
}

impl<'a> Carousel<'a> {
    #[must_use]
    pub const fn new(id: &'a str, images: &'a [ResolvedImage]) -> Self {
        Self { id, images }
    }

    fn nav(direction: &str, label: &str, icon: &'static str) -> Markup {
        html! {
            button class={ "carousel-nav carousel-nav-" (direction) } type="button" aria-label=(label) {
                (PreEscaped(icon))
            }
        }
    }

    fn slide(index: usize, image: &ResolvedImage) -> Markup {
        let loading = if index < EAGER_SLIDES { "eager" } else { "lazy" };
        html! {
            figure class="carousel-item" data-index=(index) {
                img src=(image.url)
                    alt=(image.alt.as_deref().unwrap_or(DEFAULT_ALT))
                    width=[image.width]
                    height=[image.height]
                    loading=(loading);
            }
        }
    }

    fn thumbnails(&self) -> Markup {
        html! {
            div class="carousel-thumbnails" role="tablist" aria-label="Slider thumbnails" {
                @for (index, image) in self.images.iter().enumerate() {
                    button class=(if index == 0 { "carousel-thumb active" } else { "carousel-thumb" })
                           type="button"
                           role="tab"
                           data-index=(index)
                           aria-label={ "Go to image " (index + 1) }
                           aria-current=[(index == 0).then_some("true")] {
                        img src=(image.url) alt="" loading="lazy";
                    }
                }
            }
        }
    }
}

impl Render for Carousel<'_> {
    fn render(&self) -> Markup {
        if self.images.is_empty() {
            return html! {};
        }

        html! {
            div class="carousel" id={ "carousel-" (self.id) } {
                div class="carousel-viewport" {
                    (Self::nav("prev", "Previous image", ARROW_PREV))
                    (Self::nav("next", "Next image", ARROW_NEXT))
                    div class="carousel-track" role="region" aria-label="Image slider" {
                        @for (index, image) in self.images.iter().enumerate() {
                            (Self::slide(index, image))
                        }
                    }
                }
                @if self.images.len() > 1 {
                    (self.thumbnails())
                }
                div class="carousel-counter" aria-live="polite" {
                    span class="carousel-current" { "1" }
                    " / "
                    span class="carousel-total" { (self.images.len()) }
                }
            }
        }
    }
}
