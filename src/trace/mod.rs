mod formatter;

pub use formatter::TrailFormatter;
