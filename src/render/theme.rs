use ratatui::style::Color;

/// Background palettes the players can cycle through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    DarkGradient,
    DarkSolid,
    OrangeMorning,
}

impl Theme {
    pub fn next(self) -> Self {
        match self {
            Theme::DarkGradient => Theme::DarkSolid,
            Theme::DarkSolid => Theme::OrangeMorning,
            Theme::OrangeMorning => Theme::DarkGradient,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Theme::DarkGradient => "Dark Gradient",
            Theme::DarkSolid => "Dark Solid",
            Theme::OrangeMorning => "Orange Morning",
        }
    }

    /// Background of row `y` out of `height` rows
    pub fn background(self, y: usize, height: usize) -> Color {
        match self {
            Theme::DarkGradient => lerp((0, 0, 0), (7, 26, 63), y, height),
            Theme::DarkSolid => Color::Rgb(15, 15, 30),
            Theme::OrangeMorning => lerp((255, 153, 51), (255, 204, 102), y, height),
        }
    }

    /// Stars only show up on the dark themes
    pub fn has_stars(self) -> bool {
        self != Theme::OrangeMorning
    }

    pub fn text(self) -> Color {
        match self {
            Theme::OrangeMorning => Color::Black,
            _ => Color::White,
        }
    }
}

fn lerp(from: (u8, u8, u8), to: (u8, u8, u8), step: usize, steps: usize) -> Color {
    let t = if steps <= 1 {
        0.0
    } else {
        step as f32 / (steps - 1) as f32
    };
    let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
    Color::Rgb(mix(from.0, to.0), mix(from.1, to.1), mix(from.2, to.2))
}
