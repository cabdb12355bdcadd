//! Block model of a print template.
//!
//! A template is a tree of typed blocks. Every block serializes as
//! `{ "id": ..., "type": ..., "props": {...} }`; the two container types keep
//! their nested lists inside `props` (`children` for conditional blocks,
//! `left`/`right` for two-column blocks).

use std::fmt::Display;

use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::domain::types::{BlockId, TypeConstraintError};
use crate::errors::TemplateError;

/// One node of the template tree.
#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    pub id: BlockId,
    pub kind: BlockKind,
}

/// Variant-specific payload of a [`Block`].
#[derive(Clone, Debug, PartialEq)]
pub enum BlockKind {
    Header(HeaderProps),
    Text(TextProps),
    DataField(DataFieldProps),
    DataTable(DataTableProps),
    RichContent(RichContentProps),
    Divider(DividerProps),
    Spacer(SpacerProps),
    DoctorsList(DoctorsListProps),
    Conditional(ConditionalProps),
    TwoColumn(TwoColumnProps),
    Image(ImageProps),
    PageBreak,
    /// A block type this build does not know, or a known type whose props
    /// could not be read. Kept verbatim so stored templates survive a
    /// load/save cycle; it renders to nothing.
    Unknown { block_type: String, props: Value },
}

impl Block {
    /// Creates a block with a freshly generated identifier.
    #[must_use]
    pub fn new(kind: BlockKind) -> Self {
        Self {
            id: BlockId::generate(),
            kind,
        }
    }

    /// Creates a block with an existing identifier.
    #[must_use]
    pub fn with_id(id: BlockId, kind: BlockKind) -> Self {
        Self { id, kind }
    }

    /// The serialized `type` tag of this block.
    pub fn type_name(&self) -> &str {
        self.kind.type_name()
    }

    /// Nested block lists held by container blocks; empty for leaves.
    pub fn child_lists(&self) -> Vec<&[Block]> {
        match &self.kind {
            BlockKind::Conditional(props) => vec![props.children.as_slice()],
            BlockKind::TwoColumn(props) => vec![props.left.as_slice(), props.right.as_slice()],
            _ => Vec::new(),
        }
    }
}

impl BlockKind {
    pub fn type_name(&self) -> &str {
        match self {
            BlockKind::Header(_) => "header",
            BlockKind::Text(_) => "text",
            BlockKind::DataField(_) => "data-field",
            BlockKind::DataTable(_) => "data-table",
            BlockKind::RichContent(_) => "rich-content",
            BlockKind::Divider(_) => "divider",
            BlockKind::Spacer(_) => "spacer",
            BlockKind::DoctorsList(_) => "doctors-list",
            BlockKind::Conditional(_) => "conditional",
            BlockKind::TwoColumn(_) => "two-column",
            BlockKind::Image(_) => "image",
            BlockKind::PageBreak => "page-break",
            BlockKind::Unknown { block_type, .. } => block_type,
        }
    }
}

/// Serialized form of a block before its props are interpreted.
#[derive(Deserialize)]
struct RawBlock {
    id: BlockId,
    #[serde(rename = "type")]
    block_type: String,
    #[serde(default)]
    props: Value,
}

fn parse_kind(block_type: &str, props: &Value) -> Result<Option<BlockKind>, serde_json::Error> {
    let kind = match block_type {
        "header" => BlockKind::Header(HeaderProps::deserialize(props)?),
        "text" => BlockKind::Text(TextProps::deserialize(props)?),
        "data-field" => BlockKind::DataField(DataFieldProps::deserialize(props)?),
        "data-table" => BlockKind::DataTable(DataTableProps::deserialize(props)?),
        "rich-content" => BlockKind::RichContent(RichContentProps::deserialize(props)?),
        "divider" => BlockKind::Divider(DividerProps::deserialize(props)?),
        "spacer" => BlockKind::Spacer(SpacerProps::deserialize(props)?),
        "doctors-list" => BlockKind::DoctorsList(DoctorsListProps::deserialize(props)?),
        "conditional" => BlockKind::Conditional(ConditionalProps::deserialize(props)?),
        "two-column" => BlockKind::TwoColumn(TwoColumnProps::deserialize(props)?),
        "image" => BlockKind::Image(ImageProps::deserialize(props)?),
        "page-break" => BlockKind::PageBreak,
        _ => return Ok(None),
    };
    Ok(Some(kind))
}

impl From<RawBlock> for Block {
    fn from(mut raw: RawBlock) -> Self {
        let props = match raw.props.take() {
            Value::Null => Value::Object(serde_json::Map::new()),
            other => other,
        };

        let kind = match parse_kind(&raw.block_type, &props) {
            Ok(Some(kind)) => kind,
            Ok(None) => BlockKind::Unknown {
                block_type: raw.block_type,
                props,
            },
            Err(source) => {
                let err = TemplateError::MalformedBlock {
                    id: raw.id.to_string(),
                    block_type: raw.block_type.clone(),
                    source,
                };
                log::warn!("{err}, the block will not be rendered");
                BlockKind::Unknown {
                    block_type: raw.block_type,
                    props,
                }
            }
        };

        Block { id: raw.id, kind }
    }
}

impl<'de> Deserialize<'de> for Block {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        RawBlock::deserialize(deserializer).map(Block::from)
    }
}

impl Serialize for Block {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Block", 3)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("type", self.kind.type_name())?;
        match &self.kind {
            BlockKind::Header(props) => state.serialize_field("props", props)?,
            BlockKind::Text(props) => state.serialize_field("props", props)?,
            BlockKind::DataField(props) => state.serialize_field("props", props)?,
            BlockKind::DataTable(props) => state.serialize_field("props", props)?,
            BlockKind::RichContent(props) => state.serialize_field("props", props)?,
            BlockKind::Divider(props) => state.serialize_field("props", props)?,
            BlockKind::Spacer(props) => state.serialize_field("props", props)?,
            BlockKind::DoctorsList(props) => state.serialize_field("props", props)?,
            BlockKind::Conditional(props) => state.serialize_field("props", props)?,
            BlockKind::TwoColumn(props) => state.serialize_field("props", props)?,
            BlockKind::Image(props) => state.serialize_field("props", props)?,
            BlockKind::PageBreak => state.serialize_field("props", &serde_json::Map::new())?,
            BlockKind::Unknown { props, .. } => state.serialize_field("props", props)?,
        }
        state.end()
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Alignment {
    /// CSS `text-align` value.
    pub fn as_css(self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }

    /// CSS `justify-content` value for flex containers.
    pub fn as_justify(self) -> &'static str {
        match self {
            Alignment::Left => "flex-start",
            Alignment::Center => "center",
            Alignment::Right => "flex-end",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct HeaderProps {
    pub show_hospital: bool,
    pub show_unit: bool,
    pub show_telephone: bool,
    pub show_logo: bool,
    pub alignment: Alignment,
}

impl Default for HeaderProps {
    fn default() -> Self {
        Self {
            show_hospital: true,
            show_unit: true,
            show_telephone: true,
            show_logo: true,
            alignment: Alignment::Center,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum FontSize {
    #[serde(rename = "xs")]
    ExtraSmall,
    #[serde(rename = "sm")]
    Small,
    #[default]
    #[serde(rename = "base")]
    Base,
    #[serde(rename = "lg")]
    Large,
    #[serde(rename = "xl")]
    ExtraLarge,
    #[serde(rename = "2xl")]
    Huge,
}

impl FontSize {
    pub fn pixels(self) -> u32 {
        match self {
            FontSize::ExtraSmall => 12,
            FontSize::Small => 14,
            FontSize::Base => 16,
            FontSize::Large => 18,
            FontSize::ExtraLarge => 20,
            FontSize::Huge => 24,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct TextProps {
    /// Literal text; `{{field.path}}` tokens are substituted at render time.
    pub content: String,
    pub font_size: FontSize,
    pub alignment: Alignment,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FieldFormat {
    #[default]
    None,
    Date,
    Age,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct DataFieldProps {
    pub field: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub fallback: String,
    pub format: FieldFormat,
    pub alignment: Alignment,
}

/// Physical column count of a data table; always an even number so that
/// each slot holds one label cell and one value cell.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "u8", into = "u8")]
pub enum TableColumns {
    #[default]
    Two,
    Four,
}

impl TableColumns {
    pub fn count(self) -> usize {
        match self {
            TableColumns::Two => 2,
            TableColumns::Four => 4,
        }
    }

    /// Label/value pairs that fit into one physical row.
    pub fn slots(self) -> usize {
        self.count() / 2
    }
}

impl TryFrom<u8> for TableColumns {
    type Error = TypeConstraintError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(TableColumns::Two),
            4 => Ok(TableColumns::Four),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "table columns must be 2 or 4, got {other}"
            ))),
        }
    }
}

impl From<TableColumns> for u8 {
    fn from(value: TableColumns) -> Self {
        match value {
            TableColumns::Two => 2,
            TableColumns::Four => 4,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct DataTableRow {
    pub label: String,
    pub field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colspan: Option<u8>,
}

impl DataTableRow {
    /// Number of slots the row occupies, at least one.
    pub fn span(&self) -> usize {
        usize::from(self.colspan.unwrap_or(1).max(1))
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct DataTableProps {
    pub rows: Vec<DataTableRow>,
    pub columns: TableColumns,
    pub show_border: bool,
}

impl Default for DataTableProps {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            columns: TableColumns::Four,
            show_border: true,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct RichContentProps {
    pub field: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub show_if_empty: bool,
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DividerStyle {
    #[default]
    Solid,
    Dashed,
    Double,
}

impl DividerStyle {
    pub fn as_css(self) -> &'static str {
        match self {
            DividerStyle::Solid => "solid",
            DividerStyle::Dashed => "dashed",
            DividerStyle::Double => "double",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DividerProps {
    pub style: DividerStyle,
    /// Line thickness in pixels, 1 to 3.
    pub thickness: u8,
}

impl Default for DividerProps {
    fn default() -> Self {
        Self {
            style: DividerStyle::Solid,
            thickness: 1,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SpacerProps {
    /// Gap height in pixels.
    pub height: u32,
}

impl Default for SpacerProps {
    fn default() -> Self {
        Self { height: 20 }
    }
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum DoctorsListType {
    DoneBy,
    AssistedBy,
    #[default]
    Both,
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DoctorsLayout {
    Inline,
    #[default]
    List,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct DoctorsListProps {
    #[serde(rename = "type")]
    pub list_type: DoctorsListType,
    pub show_designation: bool,
    pub layout: DoctorsLayout,
}

/// Operator of a conditional block.
///
/// Operators this build does not know are kept as `Other` and evaluate to
/// `true`, so content is shown rather than silently dropped.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum ConditionOperator {
    Exists,
    #[default]
    NotEmpty,
    IsEmpty,
    Equals,
    Other(String),
}

impl Display for ConditionOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConditionOperator::Exists => write!(f, "exists"),
            ConditionOperator::NotEmpty => write!(f, "notEmpty"),
            ConditionOperator::IsEmpty => write!(f, "isEmpty"),
            ConditionOperator::Equals => write!(f, "equals"),
            ConditionOperator::Other(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for ConditionOperator {
    fn from(s: &str) -> Self {
        match s {
            "exists" => ConditionOperator::Exists,
            "notEmpty" => ConditionOperator::NotEmpty,
            "isEmpty" => ConditionOperator::IsEmpty,
            "equals" => ConditionOperator::Equals,
            _ => ConditionOperator::Other(s.to_string()),
        }
    }
}

impl From<String> for ConditionOperator {
    fn from(s: String) -> Self {
        s.as_str().into()
    }
}

impl From<ConditionOperator> for String {
    fn from(value: ConditionOperator) -> Self {
        value.to_string()
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ConditionalProps {
    pub field: String,
    pub condition: ConditionOperator,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub children: Vec<Block>,
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum ColumnRatio {
    #[default]
    #[serde(rename = "50-50")]
    Even,
    #[serde(rename = "33-67")]
    ThirdLeft,
    #[serde(rename = "67-33")]
    ThirdRight,
    #[serde(rename = "25-75")]
    QuarterLeft,
    #[serde(rename = "75-25")]
    QuarterRight,
}

impl ColumnRatio {
    /// CSS widths of the left and right column.
    pub fn widths(self) -> (&'static str, &'static str) {
        match self {
            ColumnRatio::Even => ("50%", "50%"),
            ColumnRatio::ThirdLeft => ("33.33%", "66.67%"),
            ColumnRatio::ThirdRight => ("66.67%", "33.33%"),
            ColumnRatio::QuarterLeft => ("25%", "75%"),
            ColumnRatio::QuarterRight => ("75%", "25%"),
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TwoColumnProps {
    pub ratio: ColumnRatio,
    pub left: Vec<Block>,
    pub right: Vec<Block>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageProps {
    /// Base64 data URL of the image.
    pub src: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_height: Option<u32>,
    pub alignment: Alignment,
    pub alt: String,
}
