//! Stored print template record and the starter layouts offered by the builder.

use serde::{Deserialize, Serialize};

use crate::domain::block::{
    Alignment, Block, BlockKind, ConditionOperator, ConditionalProps, DataFieldProps,
    DataTableProps, DataTableRow, DividerProps, DividerStyle, DoctorsListProps, FieldFormat,
    FontSize, HeaderProps, RichContentProps, SpacerProps, TableColumns, TextProps,
};
use crate::domain::structure::TemplateStructure;

/// Kind of document a template prints.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TemplateType {
    #[default]
    Surgery,
    Followup,
}

/// Print template as persisted by the template repository.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PrintTemplate {
    pub id: String,
    pub name: String,
    pub template_type: TemplateType,
    pub structure: TemplateStructure,
    #[serde(default)]
    pub is_default: bool,
}

impl PrintTemplate {
    /// Builds a template record seeded with the starter layout for its type.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, template_type: TemplateType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            template_type,
            structure: default_template(template_type),
            is_default: false,
        }
    }
}

fn row(label: &str, field: &str) -> DataTableRow {
    DataTableRow {
        label: label.to_string(),
        field: field.to_string(),
        colspan: None,
    }
}

fn rich(field: &str, title: &str) -> Block {
    Block::new(BlockKind::RichContent(RichContentProps {
        field: field.to_string(),
        title: Some(title.to_string()),
        show_if_empty: false,
    }))
}

/// Starter structure the builder offers for a new template of the given type.
pub fn default_template(template_type: TemplateType) -> TemplateStructure {
    let mut blocks = vec![
        Block::new(BlockKind::Header(HeaderProps::default())),
        Block::new(BlockKind::Divider(DividerProps {
            style: DividerStyle::Double,
            thickness: 1,
        })),
        Block::new(BlockKind::DataTable(DataTableProps {
            rows: vec![
                row("Name", "patient.name"),
                row("Age", "patient.age"),
                row("PHN", "patient.phn"),
                row("BHT", "surgery.bht"),
                row("Ward", "surgery.ward"),
                row("Date", "surgery.date"),
                DataTableRow {
                    colspan: Some(2),
                    ..row("Surgery", "surgery.title")
                },
            ],
            columns: TableColumns::Four,
            show_border: true,
        })),
        Block::new(BlockKind::Spacer(SpacerProps::default())),
    ];

    match template_type {
        TemplateType::Surgery => {
            blocks.push(Block::new(BlockKind::DoctorsList(DoctorsListProps {
                show_designation: true,
                ..Default::default()
            })));
            blocks.push(rich("surgery.notes", "Surgery Notes"));
            blocks.push(rich("surgery.postOpNotes", "Post-operative Notes"));
        }
        TemplateType::Followup => {
            blocks.push(Block::new(BlockKind::DataField(DataFieldProps {
                field: "followup.date".to_string(),
                label: Some("Followup Date".to_string()),
                fallback: "-".to_string(),
                format: FieldFormat::Date,
                alignment: Alignment::Left,
            })));
            blocks.push(Block::new(BlockKind::Conditional(ConditionalProps {
                field: "followup.notes".to_string(),
                condition: ConditionOperator::NotEmpty,
                value: None,
                children: vec![
                    Block::new(BlockKind::Text(TextProps {
                        content: "Followup notes for {{ patient.name }}".to_string(),
                        font_size: FontSize::Large,
                        bold: true,
                        ..Default::default()
                    })),
                    rich("followup.notes", "Notes"),
                ],
            })));
        }
    }

    TemplateStructure::new(blocks)
}
