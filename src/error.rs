use rusty_tesseract::TessError;

use std::error::Error;
use std::fmt;
use std::io::Error as IOError;

#[derive(Debug)]
pub struct PlateScanError(PlateScanErrorKind);

#[derive(Debug)]
pub enum PlateScanErrorKind {
    IOError(IOError),
    ImageError(image::ImageError),
    OcrError(TessError),
    CsvError(csv::Error),
    DuplicatePlateError(String),
}

impl PlateScanError {
    fn kind(&self) -> &PlateScanErrorKind {
        &self.0
    }
}

impl<T> From<T> for PlateScanError
where T: Into<PlateScanErrorKind>
{
    fn from(e: T) -> Self {
        Self(e.into())
    }
}

impl fmt::Display for PlateScanError {

    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            PlateScanErrorKind::IOError(e) => e.fmt(f),
            PlateScanErrorKind::ImageError(e) => e.fmt(f),
            PlateScanErrorKind::OcrError(e) => e.fmt(f),
            PlateScanErrorKind::CsvError(e) => e.fmt(f),
            PlateScanErrorKind::DuplicatePlateError(plate) => {
                write!(f, "duplicate plate in registry: {}", plate)
            }
        }
    }
}

impl Error for PlateScanError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self.kind() {
            PlateScanErrorKind::IOError(e) => e.source(),
            PlateScanErrorKind::ImageError(e) => e.source(),
            PlateScanErrorKind::OcrError(_) => None,
            PlateScanErrorKind::CsvError(e) => e.source(),
            PlateScanErrorKind::DuplicatePlateError(_) => None,
        }
    }
}

impl From<IOError> for PlateScanErrorKind {
    fn from(e: IOError) -> Self {
        Self::IOError(e)
    }
}

impl From<image::ImageError> for PlateScanErrorKind {
    fn from(e: image::ImageError) -> Self {
        Self::ImageError(e)
    }
}

impl From<TessError> for PlateScanErrorKind {
    fn from(e: TessError) -> Self {
        Self::OcrError(e)
    }
}

impl From<csv::Error> for PlateScanErrorKind {
    fn from(e: csv::Error) -> Self {
        Self::CsvError(e)
    }
}
