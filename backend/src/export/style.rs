//! Cell formats derived from an [`ExportTemplate`].

use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern};

use crate::error::{ExportError, ExportResult};
use crate::profile::{BorderStyle, ExportTemplate};

/// Every format the sheet writer needs, built once per export.
#[derive(Debug, Clone)]
pub struct SheetStyles {
    /// Banner row holding no text
    pub banner: Format,
    pub banner_title: Format,
    pub banner_subtitle: Format,
    pub header: Format,
    pub text: Format,
    pub number: Format,
    pub date: Format,
}

impl SheetStyles {
    pub fn from_template(template: &ExportTemplate) -> ExportResult<Self> {
        let banner_fill = parse_hex_color(&template.banner_fill)?;
        let banner_font = parse_hex_color(&template.banner_font_color)?;
        let header_fill = parse_hex_color(&template.header_fill)?;
        let border = border_of(template.border);

        let banner = Format::new()
            .set_pattern(FormatPattern::Solid)
            .set_background_color(banner_fill);

        let banner_line = banner
            .clone()
            .set_bold()
            .set_font_color(banner_font)
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter);

        let text = Format::new().set_border(border);

        Ok(Self {
            banner_title: banner_line.clone().set_font_size(template.title_font_size),
            banner_subtitle: banner_line.set_font_size(template.subtitle_font_size),
            banner,
            header: Format::new()
                .set_bold()
                .set_pattern(FormatPattern::Solid)
                .set_background_color(header_fill)
                .set_border(border)
                .set_border_bottom(FormatBorder::Thin),
            number: text.clone().set_num_format(&template.numeric_format),
            date: text.clone().set_num_format(&template.date_format),
            text,
        })
    }
}

fn border_of(style: BorderStyle) -> FormatBorder {
    match style {
        BorderStyle::None => FormatBorder::None,
        BorderStyle::Thin => FormatBorder::Thin,
        BorderStyle::Medium => FormatBorder::Medium,
        BorderStyle::Thick => FormatBorder::Thick,
    }
}

/// Parse `#RRGGBB` (the `#` is optional).
pub fn parse_hex_color(value: &str) -> ExportResult<Color> {
    let hex = value.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ExportError::InvalidTemplate(format!("bad color '{}'", value)));
    }
    u32::from_str_radix(hex, 16)
        .map(Color::RGB)
        .map_err(|_| ExportError::InvalidTemplate(format!("bad color '{}'", value)))
}
