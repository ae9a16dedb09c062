use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: Color,
    pub panel: Color,
    pub text: Color,
    pub dim: Color,
    pub accent: Color,
    pub border: Color,
    pub positive: Color,
    pub negative: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::Rgb(26, 32, 44),
            panel: Color::Rgb(45, 55, 72),
            text: Color::Rgb(237, 242, 247),
            dim: Color::Rgb(160, 174, 192),
            accent: Color::Rgb(56, 178, 172),
            border: Color::Rgb(74, 85, 104),
            positive: Color::Rgb(72, 187, 120),
            negative: Color::Rgb(245, 101, 101),
            error: Color::Rgb(229, 62, 62),
        }
    }
}
