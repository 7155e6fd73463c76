use super::blocks::*;

/// Block represents one renderable unit of post content
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Text(TextBlock),
    Image(ImageBlock),
    Row(RowBlock),
    ReadMore,
    Poll(PollBlock),
}

impl Block {
    /// Get block type name
    pub fn kind(&self) -> &'static str {
        match self {
            Block::Text(_) => "text",
            Block::Image(_) => "image",
            Block::Row(_) => "row",
            Block::ReadMore => "read_more",
            Block::Poll(_) => "poll",
        }
    }

    pub fn as_poll(&self) -> Option<&PollBlock> {
        match self {
            Block::Poll(poll) => Some(poll),
            _ => None,
        }
    }

    /// Images carried by this block, in display order.
    pub fn images(&self) -> &[ImageBlock] {
        match self {
            Block::Image(image) => std::slice::from_ref(image),
            Block::Row(row) => &row.images,
            _ => &[],
        }
    }
}

impl From<TextBlock> for Block {
    fn from(block: TextBlock) -> Self {
        Block::Text(block)
    }
}

impl From<ImageBlock> for Block {
    fn from(block: ImageBlock) -> Self {
        Block::Image(block)
    }
}

impl From<RowBlock> for Block {
    fn from(block: RowBlock) -> Self {
        Block::Row(block)
    }
}

impl From<PollBlock> for Block {
    fn from(block: PollBlock) -> Self {
        Block::Poll(block)
    }
}
