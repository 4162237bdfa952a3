/// Export request: grid size and integer upscale factor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportSpec {
    pub grid_size: u32,
    pub multiplier: u32,
}

impl ExportSpec {
    /// Download filename handed to the caller
    pub fn filename(&self) -> String {
        format!("pixel-art-{0}x{0}.png", self.grid_size)
    }
}
