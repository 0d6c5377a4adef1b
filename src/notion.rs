//! Notion create-page request body.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::parser::blocks::{truncate_text, Block};

/// One page to create, before it is shaped for the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub title: String,
    pub date: NaiveDate,
    pub link: String,
    pub blocks: Vec<Block>,
}

impl PageRequest {
    pub fn to_body<'a>(&'a self, database_id: &'a str) -> CreatePage<'a> {
        CreatePage {
            parent: Parent { database_id },
            properties: Properties {
                name: TitleProperty {
                    title: vec![RichText::new(&self.title)],
                },
                date: DateProperty {
                    date: DateValue {
                        start: self.date.format("%Y-%m-%d").to_string(),
                    },
                },
                link: UrlProperty { url: &self.link },
            },
            children: self.blocks.iter().map(BlockObject::from_block).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreatePage<'a> {
    parent: Parent<'a>,
    properties: Properties<'a>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<BlockObject>,
}

#[derive(Debug, Serialize)]
struct Parent<'a> {
    database_id: &'a str,
}

#[derive(Debug, Serialize)]
struct Properties<'a> {
    #[serde(rename = "Name")]
    name: TitleProperty,
    #[serde(rename = "Date")]
    date: DateProperty,
    #[serde(rename = "Link")]
    link: UrlProperty<'a>,
}

#[derive(Debug, Serialize)]
struct TitleProperty {
    title: Vec<RichText>,
}

#[derive(Debug, Serialize)]
struct DateProperty {
    date: DateValue,
}

#[derive(Debug, Serialize)]
struct DateValue {
    start: String,
}

#[derive(Debug, Serialize)]
struct UrlProperty<'a> {
    url: &'a str,
}

#[derive(Debug, Serialize)]
struct RichText {
    #[serde(rename = "type")]
    kind: &'static str,
    text: TextContent,
}

#[derive(Debug, Serialize)]
struct TextContent {
    content: String,
}

impl RichText {
    fn new(content: &str) -> Self {
        RichText {
            kind: "text",
            text: TextContent {
                content: truncate_text(content),
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct RichTextBody {
    rich_text: Vec<RichText>,
}

/// A block in Notion's `{"object": "block", "type": T, T: {...}}` shape.
#[derive(Debug, Serialize)]
struct BlockObject {
    object: &'static str,
    #[serde(flatten)]
    content: BlockContent,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum BlockContent {
    #[serde(rename = "heading_2")]
    Heading2 { heading_2: RichTextBody },
    #[serde(rename = "heading_3")]
    Heading3 { heading_3: RichTextBody },
    BulletedListItem { bulleted_list_item: RichTextBody },
    Quote { quote: RichTextBody },
    Paragraph { paragraph: RichTextBody },
}

impl BlockObject {
    fn from_block(block: &Block) -> Self {
        let body = RichTextBody {
            rich_text: vec![RichText::new(block.text())],
        };
        let content = match block {
            Block::Heading { level: 2, .. } => BlockContent::Heading2 { heading_2: body },
            Block::Heading { .. } => BlockContent::Heading3 { heading_3: body },
            Block::ListItem(_) => BlockContent::BulletedListItem {
                bulleted_list_item: body,
            },
            Block::Quote(_) => BlockContent::Quote { quote: body },
            Block::Paragraph(_) => BlockContent::Paragraph { paragraph: body },
        };
        BlockObject {
            object: "block",
            content,
        }
    }
}

/// The only part of the create-page response we read.
#[derive(Debug, Deserialize)]
pub struct CreatedPage {
    pub id: String,
}
