//! Style descriptor parsing for the taffy oracle.
//!
//! Descriptors are CSS-like declaration lists:
//!
//! ```text
//! display: flex; flex-wrap: wrap; gap: 8px 12px; padding: 4px
//! ```
//!
//! Only layout-affecting properties are understood. Unknown properties are
//! skipped; malformed declarations are refused.

use taffy::{
    AlignContent, AlignItems, Dimension, Display, FlexDirection, FlexWrap, JustifyContent,
    LengthPercentage, LengthPercentageAuto, Position, Rect as TaffyRect, Size as TaffySize,
    Style,
};
use tracing::trace;

use crate::error::LayoutOracleError;
use crate::types::Size;

// =============================================================================
// LENGTHS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
enum Length {
    Px(f32),
    Percent(f32),
    Auto,
}

fn parse_number(value: &str) -> Result<f32, String> {
    match value.parse::<f32>() {
        Ok(n) if n.is_finite() => Ok(n),
        _ => Err(format!("expected a number, got {value:?}")),
    }
}

fn parse_length(value: &str) -> Result<Length, String> {
    if value.eq_ignore_ascii_case("auto") {
        return Ok(Length::Auto);
    }
    if let Some(percent) = value.strip_suffix('%') {
        return parse_number(percent).map(|p| Length::Percent(p / 100.0));
    }
    parse_number(value.strip_suffix("px").unwrap_or(value)).map(Length::Px)
}

/// Lengths that cannot be negative (sizes, padding, gaps).
fn parse_extent(value: &str) -> Result<Length, String> {
    match parse_length(value)? {
        Length::Px(n) | Length::Percent(n) if n < 0.0 => {
            Err(format!("negative length {value:?}"))
        }
        length => Ok(length),
    }
}

fn to_dimension(length: Length) -> Dimension {
    match length {
        Length::Px(n) => Dimension::Length(n),
        Length::Percent(p) => Dimension::Percent(p),
        Length::Auto => Dimension::Auto,
    }
}

fn to_lpa(length: Length) -> LengthPercentageAuto {
    match length {
        Length::Px(n) => LengthPercentageAuto::Length(n),
        Length::Percent(p) => LengthPercentageAuto::Percent(p),
        Length::Auto => LengthPercentageAuto::Auto,
    }
}

fn to_lp(length: Length) -> Result<LengthPercentage, String> {
    match length {
        Length::Px(n) => Ok(LengthPercentage::Length(n)),
        Length::Percent(p) => Ok(LengthPercentage::Percent(p)),
        Length::Auto => Err("auto is not allowed here".to_string()),
    }
}

/// Expand a 1-4 value edge shorthand (`top right bottom left`).
fn parse_edges<T: Copy>(
    value: &str,
    parse: impl Fn(&str) -> Result<T, String>,
) -> Result<TaffyRect<T>, String> {
    let parts = value
        .split_whitespace()
        .map(parse)
        .collect::<Result<Vec<_>, _>>()?;

    let (top, right, bottom, left) = match parts.as_slice() {
        [all] => (*all, *all, *all, *all),
        [vertical, horizontal] => (*vertical, *horizontal, *vertical, *horizontal),
        [top, horizontal, bottom] => (*top, *horizontal, *bottom, *horizontal),
        [top, right, bottom, left] => (*top, *right, *bottom, *left),
        _ => return Err(format!("expected 1 to 4 values, got {value:?}")),
    };

    Ok(TaffyRect {
        left,
        right,
        top,
        bottom,
    })
}

// =============================================================================
// KEYWORDS
// =============================================================================

fn parse_display(value: &str) -> Result<Display, String> {
    match value {
        "block" => Ok(Display::Block),
        "flex" => Ok(Display::Flex),
        "none" => Ok(Display::None),
        _ => Err(format!("unsupported display {value:?}")),
    }
}

fn parse_position(value: &str) -> Result<Position, String> {
    match value {
        "relative" | "static" => Ok(Position::Relative),
        "absolute" => Ok(Position::Absolute),
        _ => Err(format!("unsupported position {value:?}")),
    }
}

fn parse_flex_direction(value: &str) -> Result<FlexDirection, String> {
    match value {
        "row" => Ok(FlexDirection::Row),
        "column" => Ok(FlexDirection::Column),
        "row-reverse" => Ok(FlexDirection::RowReverse),
        "column-reverse" => Ok(FlexDirection::ColumnReverse),
        _ => Err(format!("unknown flex-direction {value:?}")),
    }
}

fn parse_flex_wrap(value: &str) -> Result<FlexWrap, String> {
    match value {
        "nowrap" => Ok(FlexWrap::NoWrap),
        "wrap" => Ok(FlexWrap::Wrap),
        "wrap-reverse" => Ok(FlexWrap::WrapReverse),
        _ => Err(format!("unknown flex-wrap {value:?}")),
    }
}

/// Shared by `justify-content` and `align-content`.
fn parse_content_alignment(value: &str) -> Result<AlignContent, String> {
    match value {
        "start" => Ok(AlignContent::Start),
        "end" => Ok(AlignContent::End),
        "flex-start" => Ok(AlignContent::FlexStart),
        "flex-end" => Ok(AlignContent::FlexEnd),
        "center" => Ok(AlignContent::Center),
        "stretch" => Ok(AlignContent::Stretch),
        "space-between" => Ok(AlignContent::SpaceBetween),
        "space-around" => Ok(AlignContent::SpaceAround),
        "space-evenly" => Ok(AlignContent::SpaceEvenly),
        _ => Err(format!("unknown content alignment {value:?}")),
    }
}

fn parse_justify_content(value: &str) -> Result<JustifyContent, String> {
    parse_content_alignment(value)
}

/// Shared by `align-items` and `align-self`.
fn parse_item_alignment(value: &str) -> Result<AlignItems, String> {
    match value {
        "start" => Ok(AlignItems::Start),
        "end" => Ok(AlignItems::End),
        "flex-start" => Ok(AlignItems::FlexStart),
        "flex-end" => Ok(AlignItems::FlexEnd),
        "center" => Ok(AlignItems::Center),
        "baseline" => Ok(AlignItems::Baseline),
        "stretch" => Ok(AlignItems::Stretch),
        _ => Err(format!("unknown item alignment {value:?}")),
    }
}

fn parse_non_negative(value: &str) -> Result<f32, String> {
    let n = parse_number(value)?;
    if n < 0.0 {
        return Err(format!("expected a non-negative number, got {value:?}"));
    }
    Ok(n)
}

// =============================================================================
// DECLARATIONS
// =============================================================================

fn apply_flex_shorthand(style: &mut Style, value: &str) -> Result<(), String> {
    let (grow, shrink, basis) = match value {
        "none" => (0.0, 0.0, Dimension::Auto),
        "auto" => (1.0, 1.0, Dimension::Auto),
        _ => (parse_non_negative(value)?, 1.0, Dimension::Length(0.0)),
    };
    style.flex_grow = grow;
    style.flex_shrink = shrink;
    style.flex_basis = basis;
    Ok(())
}

fn apply_declaration(style: &mut Style, name: &str, value: &str) -> Result<(), String> {
    match name {
        "display" => style.display = parse_display(value)?,
        "position" => style.position = parse_position(value)?,

        // Flex container
        "flex-direction" => style.flex_direction = parse_flex_direction(value)?,
        "flex-wrap" => style.flex_wrap = parse_flex_wrap(value)?,
        "justify-content" => style.justify_content = Some(parse_justify_content(value)?),
        "align-content" => style.align_content = Some(parse_content_alignment(value)?),
        "align-items" => style.align_items = Some(parse_item_alignment(value)?),

        // Flex item
        "align-self" => style.align_self = Some(parse_item_alignment(value)?),
        "flex-grow" => style.flex_grow = parse_non_negative(value)?,
        "flex-shrink" => style.flex_shrink = parse_non_negative(value)?,
        "flex-basis" => style.flex_basis = to_dimension(parse_extent(value)?),
        "flex" => apply_flex_shorthand(style, value)?,

        // Dimensions
        "width" => style.size.width = to_dimension(parse_extent(value)?),
        "height" => style.size.height = to_dimension(parse_extent(value)?),
        "min-width" => style.min_size.width = to_dimension(parse_extent(value)?),
        "min-height" => style.min_size.height = to_dimension(parse_extent(value)?),
        "max-width" => style.max_size.width = to_dimension(parse_extent(value)?),
        "max-height" => style.max_size.height = to_dimension(parse_extent(value)?),

        // Spacing
        "margin" => style.margin = parse_edges(value, |v| parse_length(v).map(to_lpa))?,
        "margin-top" => style.margin.top = to_lpa(parse_length(value)?),
        "margin-right" => style.margin.right = to_lpa(parse_length(value)?),
        "margin-bottom" => style.margin.bottom = to_lpa(parse_length(value)?),
        "margin-left" => style.margin.left = to_lpa(parse_length(value)?),
        "padding" => style.padding = parse_edges(value, |v| parse_extent(v).and_then(to_lp))?,
        "padding-top" => style.padding.top = to_lp(parse_extent(value)?)?,
        "padding-right" => style.padding.right = to_lp(parse_extent(value)?)?,
        "padding-bottom" => style.padding.bottom = to_lp(parse_extent(value)?)?,
        "padding-left" => style.padding.left = to_lp(parse_extent(value)?)?,

        // Gaps: `gap: <row> [<column>]`
        "gap" => {
            let mut parts = value.split_whitespace();
            let row = parts.next().unwrap_or(value);
            let column = parts.next().unwrap_or(row);
            if parts.next().is_some() {
                return Err(format!("expected 1 or 2 values, got {value:?}"));
            }
            style.gap = TaffySize {
                width: to_lp(parse_extent(column)?)?,
                height: to_lp(parse_extent(row)?)?,
            };
        }
        "row-gap" => style.gap.height = to_lp(parse_extent(value)?)?,
        "column-gap" => style.gap.width = to_lp(parse_extent(value)?)?,

        _ => trace!(property = name, "ignoring unknown style property"),
    }
    Ok(())
}

/// Parse a style descriptor into a taffy [`Style`].
///
/// An empty descriptor yields taffy's default style.
pub fn parse_style(descriptor: &str) -> Result<Style, LayoutOracleError> {
    let mut style = Style::default();

    for declaration in descriptor.split(';') {
        let declaration = declaration.trim();
        if declaration.is_empty() {
            continue;
        }

        let Some((name, value)) = declaration.split_once(':') else {
            return Err(LayoutOracleError::invalid_style(
                descriptor,
                format!("missing ':' in {declaration:?}"),
            ));
        };
        let name = name.trim().to_ascii_lowercase();
        let value = value.trim();
        if value.is_empty() {
            return Err(LayoutOracleError::invalid_style(
                descriptor,
                format!("{name} has no value"),
            ));
        }

        apply_declaration(&mut style, &name, value)
            .map_err(|reason| LayoutOracleError::invalid_style(descriptor, reason))?;
    }

    Ok(style)
}

/// Pin a style to a declared size so the engine cannot stretch or shrink it.
pub fn apply_fixed_size(style: &mut Style, size: Size) {
    let pinned = TaffySize {
        width: Dimension::Length(size.width),
        height: Dimension::Length(size.height),
    };
    style.size = pinned;
    style.min_size = pinned;
    style.max_size = pinned;
    style.flex_shrink = 0.0;
}
