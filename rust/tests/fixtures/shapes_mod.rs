//! Shape rendering

pub async fn draw(id: u32) {
    let _ = id;
}

pub async fn render_all(ids: Vec<u32>, scale: f32) -> Result<usize, String> {
    Ok(ids.len() * scale as usize)
}

pub fn count(ids: &[u32]) -> usize {
    ids.len()
}

pub struct Canvas {
    width: u32,
}

impl Canvas {
    pub fn new(width: u32) -> Self {
        Self { width }
    }

    pub fn width(&self) -> u32 {
        self.width
    }
}
