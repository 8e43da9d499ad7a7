use crossterm::style::{ContentStyle, Stylize};

pub struct Theme;

impl Theme {
    pub fn header() -> ContentStyle {
        ContentStyle::new().blue().bold()
    }

    pub fn title() -> ContentStyle {
        ContentStyle::new().white().bold()
    }

    pub fn hint() -> ContentStyle {
        ContentStyle::new().dim()
    }

    pub fn item() -> ContentStyle {
        ContentStyle::new().cyan()
    }

    pub fn selected() -> ContentStyle {
        ContentStyle::new().on_blue().white().bold()
    }

    pub fn marker() -> ContentStyle {
        ContentStyle::new().green().bold()
    }

    pub fn separator() -> ContentStyle {
        ContentStyle::new().yellow()
    }

    pub fn section() -> ContentStyle {
        ContentStyle::new().yellow().bold()
    }

    pub fn preview() -> ContentStyle {
        ContentStyle::new().dim()
    }

    pub fn legend() -> ContentStyle {
        ContentStyle::new().dim()
    }

    pub fn status_up() -> ContentStyle {
        ContentStyle::new().green()
    }

    pub fn status_down() -> ContentStyle {
        ContentStyle::new().red()
    }

    pub fn ok() -> ContentStyle {
        ContentStyle::new().green()
    }

    pub fn warn() -> ContentStyle {
        ContentStyle::new().yellow()
    }

    pub fn error() -> ContentStyle {
        ContentStyle::new().red()
    }

    pub fn prompt() -> ContentStyle {
        ContentStyle::new().red().bold()
    }
}
