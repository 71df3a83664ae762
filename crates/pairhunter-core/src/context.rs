//! 命中点附近的上下文切片
use crate::findings::EnrichedPair;

/// 切片在命中点之后额外保留的字节数（覆盖调用本身的大致长度）
pub const CONTEXT_TAIL: usize = 40;
/// 换行占位符，保证上下文单行输出
pub const NEWLINE_PLACEHOLDER: char = '⏎';

/// 截取 `[offset - width, offset + width + 40)`，并夹紧到文本范围。
/// `width == 0` 表示关闭，返回 None。
pub fn extract_context(text: &str, offset: usize, width: usize) -> Option<String> {
    if width == 0 {
        return None;
    }
    let mut start = offset.saturating_sub(width).min(text.len());
    let mut end = offset.saturating_add(width).saturating_add(CONTEXT_TAIL).min(text.len());
    // 向外扩到字符边界，避免切断多字节字符
    while !text.is_char_boundary(start) {
        start -= 1;
    }
    while !text.is_char_boundary(end) {
        end += 1;
    }
    Some(flatten_newlines(&text[start..end]))
}

/// 为每条记录填充上下文（width 为 0 时保持 None）
pub fn attach_context(text: &str, pairs: &mut [EnrichedPair], width: usize) {
    for p in pairs.iter_mut() {
        p.context = extract_context(text, p.offset, width);
    }
}

/// `\r\n`、`\n`、单独的 `\r` 各替换为一个占位符
fn flatten_newlines(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push(NEWLINE_PLACEHOLDER);
            }
            '\n' => out.push(NEWLINE_PLACEHOLDER),
            c => out.push(c),
        }
    }
    out
}
