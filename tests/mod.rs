use typeset::builder::Builder;
use typeset::document::Document;
use typeset::settings::FormatSettings;

pub mod document;
pub mod settings;

/// Default settings with the given print width.
pub fn settings_at(print_width: usize) -> FormatSettings {
    FormatSettings { print_width, ..FormatSettings::default() }
}

/// Builds a document with `build` and renders it at the given width.
pub fn format_at<F>(print_width: usize, build: F) -> String
where
    F: FnOnce(&mut Builder<'static>),
{
    let mut builder = Builder::new(settings_at(print_width));
    build(&mut builder);
    builder.format()
}

/// Builds a document with `build` and returns the finished tree.
pub fn build_document<F>(build: F) -> Document<'static>
where
    F: FnOnce(&mut Builder<'static>),
{
    let mut builder = Builder::new(FormatSettings::default());
    build(&mut builder);
    builder.finish()
}
