/// Deterministic grid with a mix of empty cells and indices across the whole byte range.
pub fn patterned_grid(width: u8, height: u8, depth: u8) -> Vec<u8> {
    let cells = width as usize * height as usize * depth as usize;
    (0..cells)
        .map(|i| if i % 3 == 0 { 0 } else { (i * 37 % 256) as u8 })
        .collect()
}

/// A childless chunk with an arbitrary tag and payload.
pub fn unknown_chunk(tag: &[u8; 4], content: &[u8]) -> Vec<u8> {
    let mut chunk = tag.to_vec();
    chunk.extend_from_slice(&(content.len() as i32).to_le_bytes());
    chunk.extend_from_slice(&0i32.to_le_bytes());
    chunk.extend_from_slice(content);
    chunk
}
