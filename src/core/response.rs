//! Discord size limits and text fitting helpers
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Button label and custom_id limits for course keyboards
//! - 1.0.0: Line-aware message splitting

/// Discord message content limit
pub const MESSAGE_LIMIT: usize = 2000;
/// Discord button label limit
pub const BUTTON_LABEL_LIMIT: usize = 80;
/// Discord component custom_id limit
pub const CUSTOM_ID_LIMIT: usize = 100;
/// Discord allows at most this many action rows on one message
pub const ROWS_PER_MESSAGE: usize = 5;

/// Split text into message-sized pieces, preferring newline boundaries.
///
/// Never splits inside a UTF-8 character. Lines longer than `max_size`
/// are cut at the last character boundary that fits.
pub fn split_message(text: &str, max_size: usize) -> Vec<String> {
    if text.len() <= max_size {
        return vec![text.to_string()];
    }

    let mut pieces = Vec::new();
    let mut current = String::new();

    for line in text.lines() {
        let needed = if current.is_empty() {
            line.len()
        } else {
            current.len() + 1 + line.len()
        };

        if needed <= max_size {
            if !current.is_empty() {
                current.push('\n');
            }
            current.push_str(line);
            continue;
        }

        if !current.is_empty() {
            pieces.push(std::mem::take(&mut current));
        }

        let mut rest = line;
        while rest.len() > max_size {
            let cut = floor_char_boundary(rest, max_size);
            pieces.push(rest[..cut].to_string());
            rest = &rest[cut..];
        }
        current.push_str(rest);
    }

    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}

/// Split text for plain message content
pub fn split_for_message(text: &str) -> Vec<String> {
    split_message(text, MESSAGE_LIMIT)
}

/// Truncate a button label, appending "..." when shortened
pub fn truncate_label(label: &str) -> String {
    if label.len() <= BUTTON_LABEL_LIMIT {
        return label.to_string();
    }
    let end = floor_char_boundary(label, BUTTON_LABEL_LIMIT - 3);
    format!("{}...", &label[..end])
}

fn floor_char_boundary(text: &str, index: usize) -> usize {
    let mut end = index.min(text.len());
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }
    end
}
