//! 字节偏移 → 行号映射
//!
//! 预先计算每行起始偏移，查询时二分查找，整体 O((lines + matches) log lines)。
//! 行边界为 `\n`（`\r\n` 自然只计一次），单独的 `\r` 不视为换行。

/// 行起始偏移索引
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// 每行首字节偏移（升序，首元素恒为 0）
    starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut starts = Vec::with_capacity(text.len() / 64 + 1);
        starts.push(0);
        starts.extend(newline_positions(text.as_bytes()).map(|i| i + 1));
        Self { starts }
    }

    /// 返回包含 `offset` 的行号（从 1 开始）；超出文本末尾时返回最后一行
    pub fn line_of(&self, offset: usize) -> usize {
        // 第一个起点 > offset 的位置即为行号
        self.starts.partition_point(|&s| s <= offset)
    }

    /// 批量映射
    pub fn lines_for(&self, offsets: &[usize]) -> Vec<usize> {
        offsets.iter().map(|&o| self.line_of(o)).collect()
    }
}

fn newline_positions(buf: &[u8]) -> impl Iterator<Item = usize> + '_ {
    buf.iter().enumerate().filter_map(|(i, &b)| (b == b'\n').then_some(i))
}
