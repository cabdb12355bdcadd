//! Per-type rendering of a single block.

use std::fmt::Write;

use crate::domain::block::{
    Block, BlockKind, ConditionalProps, DataFieldProps, DataTableProps, DividerProps,
    DividerStyle, DoctorsLayout, DoctorsListProps, DoctorsListType, HeaderProps, ImageProps,
    RichContentProps, SpacerProps, TextProps, TwoColumnProps,
};
use crate::domain::context::DoctorContext;
use crate::render::condition::evaluate_condition;
use crate::render::escape::escape_html;
use crate::render::format::format_value;
use crate::render::interpolate::interpolate;
use crate::render::resolve::{display_value, is_blank, resolve_field};
use crate::render::{RenderChildren, RenderScope};

/// Renders one block. Container blocks hand their nested lists to
/// `render_children`.
pub fn render_block(
    block: &Block,
    scope: &RenderScope<'_>,
    render_children: RenderChildren<'_>,
) -> String {
    match &block.kind {
        BlockKind::Header(props) => render_header(props, scope),
        BlockKind::Text(props) => render_text(props, scope),
        BlockKind::DataField(props) => render_data_field(props, scope),
        BlockKind::DataTable(props) => render_data_table(props, scope),
        BlockKind::RichContent(props) => render_rich_content(props, scope),
        BlockKind::Divider(props) => render_divider(props),
        BlockKind::Spacer(props) => render_spacer(props),
        BlockKind::DoctorsList(props) => render_doctors_list(props, scope),
        BlockKind::Conditional(props) => render_conditional(props, scope, render_children),
        BlockKind::TwoColumn(props) => render_two_column(props, scope, render_children),
        BlockKind::Image(props) => render_image(props),
        BlockKind::PageBreak => {
            r#"<div class="page-break" style="page-break-after: always; break-after: page;"></div>"#
                .to_string()
        }
        BlockKind::Unknown { block_type, .. } => {
            log::warn!(
                "Skipping unrenderable block `{}` of type `{block_type}`",
                block.id
            );
            String::new()
        }
    }
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn render_header(props: &HeaderProps, scope: &RenderScope<'_>) -> String {
    let settings = &scope.context.settings;
    let mut inner = String::new();

    if props.show_logo {
        if let Some(logo) = settings.logo.as_deref().and_then(non_blank) {
            let _ = write!(
                inner,
                r#"<img class="header-logo" src="{}" alt="Logo" style="max-height: 64px;">"#,
                escape_html(logo)
            );
        }
    }
    if props.show_hospital {
        if let Some(hospital) = non_blank(&settings.hospital) {
            let _ = write!(
                inner,
                r#"<div class="header-hospital" style="font-size: 20px; font-weight: bold;">{}</div>"#,
                escape_html(hospital)
            );
        }
    }
    if props.show_unit {
        if let Some(unit) = non_blank(&settings.unit) {
            let _ = write!(
                inner,
                r#"<div class="header-unit" style="font-size: 16px;">{}</div>"#,
                escape_html(unit)
            );
        }
    }
    if props.show_telephone {
        if let Some(telephone) = non_blank(&settings.telephone) {
            let _ = write!(
                inner,
                r#"<div class="header-telephone" style="font-size: 14px;">Tel: {}</div>"#,
                escape_html(telephone)
            );
        }
    }

    if inner.is_empty() {
        return String::new();
    }

    format!(
        r#"<div class="block-header" style="text-align: {};">{inner}</div>"#,
        props.alignment.as_css()
    )
}

fn render_text(props: &TextProps, scope: &RenderScope<'_>) -> String {
    let mut style = format!(
        "font-size: {}px; text-align: {}; white-space: pre-wrap;",
        props.font_size.pixels(),
        props.alignment.as_css()
    );
    if props.bold {
        style.push_str(" font-weight: bold;");
    }
    if props.italic {
        style.push_str(" font-style: italic;");
    }
    if props.underline {
        style.push_str(" text-decoration: underline;");
    }

    format!(
        r#"<div class="block-text" style="{style}">{}</div>"#,
        interpolate(&props.content, &scope.data)
    )
}

fn render_data_field(props: &DataFieldProps, scope: &RenderScope<'_>) -> String {
    let value = format_value(
        resolve_field(&scope.data, &props.field),
        props.format,
        scope.options,
    );
    let value = if value.is_empty() {
        props.fallback.as_str()
    } else {
        value.as_str()
    };

    let label = props
        .label
        .as_deref()
        .and_then(non_blank)
        .map(|label| format!(r#"<span class="field-label">{}:</span> "#, escape_html(label)))
        .unwrap_or_default();

    format!(
        r#"<div class="block-data-field" style="text-align: {};">{label}<span class="field-value">{}</span></div>"#,
        props.alignment.as_css(),
        escape_html(value)
    )
}

fn render_data_table(props: &DataTableProps, scope: &RenderScope<'_>) -> String {
    if props.rows.is_empty() {
        return String::new();
    }

    let slots = props.columns.slots();
    let cell_style = if props.show_border {
        "border: 1px solid #000; padding: 4px;"
    } else {
        "padding: 4px;"
    };

    let mut body = String::new();
    let mut current = String::new();
    let mut used = 0;

    let mut close_row = |current: &mut String, used: &mut usize| {
        if *used < slots {
            let _ = write!(current, r#"<td colspan="{}"></td>"#, (slots - *used) * 2);
        }
        let _ = write!(body, "<tr>{current}</tr>");
        current.clear();
        *used = 0;
    };

    for row in &props.rows {
        let span = row.span().min(slots);
        if used + span > slots {
            close_row(&mut current, &mut used);
        }

        let value_cols = span * 2 - 1;
        let colspan = if value_cols > 1 {
            format!(r#" colspan="{value_cols}""#)
        } else {
            String::new()
        };
        let value = display_value(resolve_field(&scope.data, &row.field));
        let _ = write!(
            current,
            r#"<td class="table-label" style="{cell_style} font-weight: bold;">{}</td><td class="table-value"{colspan} style="{cell_style}">{}</td>"#,
            escape_html(&row.label),
            escape_html(&value)
        );

        used += span;
        if used == slots {
            close_row(&mut current, &mut used);
        }
    }
    if used > 0 {
        close_row(&mut current, &mut used);
    }

    format!(
        r#"<table class="block-data-table" style="width: 100%; border-collapse: collapse;"><tbody>{body}</tbody></table>"#
    )
}

fn render_rich_content(props: &RichContentProps, scope: &RenderScope<'_>) -> String {
    let value = resolve_field(&scope.data, &props.field);
    if is_blank(value) && !props.show_if_empty {
        return String::new();
    }

    let html = display_value(value);
    let title = props
        .title
        .as_deref()
        .and_then(non_blank)
        .map(|title| {
            format!(
                r#"<div class="section-title" style="font-weight: bold; margin-bottom: 4px;">{}</div>"#,
                escape_html(title)
            )
        })
        .unwrap_or_default();

    format!(
        r#"<div class="block-rich-content">{title}<div class="rich-content-body">{html}</div></div>"#
    )
}

fn render_divider(props: &DividerProps) -> String {
    let thickness = props.thickness.clamp(1, 3);
    let thickness = match props.style {
        DividerStyle::Double => thickness * 3,
        _ => thickness,
    };

    format!(
        r#"<hr class="block-divider" style="border: none; border-top: {thickness}px {} #000; margin: 8px 0;">"#,
        props.style.as_css()
    )
}

fn render_spacer(props: &SpacerProps) -> String {
    format!(
        r#"<div class="block-spacer" style="height: {}px;"></div>"#,
        props.height
    )
}

fn doctor_entry(doctor: &DoctorContext, show_designation: bool) -> String {
    let name = escape_html(&doctor.name);
    match doctor.designation.as_deref().and_then(non_blank) {
        Some(designation) if show_designation => {
            format!("{name} ({})", escape_html(designation))
        }
        _ => name,
    }
}

fn render_doctors_list(props: &DoctorsListProps, scope: &RenderScope<'_>) -> String {
    let surgery = &scope.context.surgery;
    let sections: Vec<(&str, &[DoctorContext])> = match props.list_type {
        DoctorsListType::DoneBy => vec![("Done By", surgery.done_by.as_slice())],
        DoctorsListType::AssistedBy => vec![("Assisted By", surgery.assisted_by.as_slice())],
        DoctorsListType::Both => vec![
            ("Done By", surgery.done_by.as_slice()),
            ("Assisted By", surgery.assisted_by.as_slice()),
        ],
    };

    let mut inner = String::new();
    for (label, doctors) in sections {
        if doctors.is_empty() {
            continue;
        }
        let entries = doctors
            .iter()
            .map(|doctor| doctor_entry(doctor, props.show_designation));

        match props.layout {
            DoctorsLayout::Inline => {
                let _ = write!(
                    inner,
                    r#"<div class="doctors-section"><span class="doctors-label" style="font-weight: bold;">{label}:</span> {}</div>"#,
                    entries.collect::<Vec<_>>().join(", ")
                );
            }
            DoctorsLayout::List => {
                let lines: String = entries
                    .map(|entry| format!(r#"<div class="doctor">{entry}</div>"#))
                    .collect();
                let _ = write!(
                    inner,
                    r#"<div class="doctors-section"><div class="doctors-label" style="font-weight: bold;">{label}:</div>{lines}</div>"#
                );
            }
        }
    }

    if inner.is_empty() {
        return String::new();
    }

    format!(r#"<div class="block-doctors-list">{inner}</div>"#)
}

fn render_conditional(
    props: &ConditionalProps,
    scope: &RenderScope<'_>,
    render_children: RenderChildren<'_>,
) -> String {
    if evaluate_condition(
        &scope.data,
        &props.field,
        &props.condition,
        props.value.as_deref(),
    ) {
        render_children(&props.children, scope)
    } else {
        String::new()
    }
}

fn render_two_column(
    props: &TwoColumnProps,
    scope: &RenderScope<'_>,
    render_children: RenderChildren<'_>,
) -> String {
    let (left_width, right_width) = props.ratio.widths();

    format!(
        concat!(
            r#"<div class="block-two-column" style="display: flex; width: 100%;">"#,
            r#"<div class="column-left" style="width: {}; box-sizing: border-box; padding-right: 8px;">{}</div>"#,
            r#"<div class="column-right" style="width: {}; box-sizing: border-box; padding-left: 8px;">{}</div>"#,
            "</div>"
        ),
        left_width,
        render_children(&props.left, scope),
        right_width,
        render_children(&props.right, scope),
    )
}

fn render_image(props: &ImageProps) -> String {
    let Some(src) = non_blank(&props.src) else {
        return String::new();
    };

    let max_width = props
        .max_width
        .map(|w| format!("{w}px"))
        .unwrap_or_else(|| "100%".to_string());
    let max_height = props
        .max_height
        .map(|h| format!(" max-height: {h}px;"))
        .unwrap_or_default();

    format!(
        r#"<div class="block-image" style="display: flex; justify-content: {};"><img src="{}" alt="{}" style="max-width: {max_width};{max_height}"></div>"#,
        props.alignment.as_justify(),
        escape_html(src),
        escape_html(&props.alt)
    )
}
