use rusttype::{Font, Scale};
use std::sync::LazyLock;

static FONT: LazyLock<Option<Font<'static>>> = LazyLock::new(|| {
    let font = Font::try_from_bytes(include_bytes!("fonts/DejaVuSansMono.ttf"));
    if font.is_none() {
        tracing::warn!("Bundled chart font failed to parse; labels will be skipped");
    }
    font
});

pub(crate) struct FontConfig {
    pub font: &'static Font<'static>,
    pub scale: Scale,
}

/// Tick values on the chart axes.
pub(crate) fn tick_font_config() -> Option<FontConfig> {
    font_config(11.0)
}

pub(crate) fn title_font_config() -> Option<FontConfig> {
    font_config(12.0)
}

fn font_config(scale: f32) -> Option<FontConfig> {
    FONT.as_ref().map(|font| FontConfig {
        font,
        scale: Scale::uniform(scale),
    })
}
