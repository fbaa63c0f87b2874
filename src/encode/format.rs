//! Requested output formats and the codecs they resolve to

use clap::ValueEnum;

/// Output format as requested by a caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Let the tool choose; resolves to JPEG
    #[default]
    Auto,
    /// Lossy JPEG
    Jpeg,
    /// Lossless PNG
    Png,
    /// Single-page PDF wrapping a JPEG
    Pdf,
}

impl OutputFormat {
    /// Codec that will actually serialize the output
    pub const fn codec(self) -> Codec {
        match self {
            Self::Auto | Self::Jpeg => Codec::Jpeg,
            Self::Png => Codec::Png,
            Self::Pdf => Codec::Pdf,
        }
    }

    /// Uppercase label used in result messages
    pub const fn label(self) -> &'static str {
        match self {
            Self::Auto => "AUTO",
            Self::Jpeg => "JPEG",
            Self::Png => "PNG",
            Self::Pdf => "PDF",
        }
    }
}

/// Closed set of encode strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
    /// Lossy raster; honors size ceilings via quality search
    Jpeg,
    /// Lossless raster; size ceilings are not enforced
    Png,
    /// Paginated document; honors size ceilings via quality search
    Pdf,
}

impl Codec {
    /// File extension including the dot
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => ".jpg",
            Self::Png => ".png",
            Self::Pdf => ".pdf",
        }
    }

    /// Whether a size ceiling can be met by lowering quality
    pub const fn honors_ceiling(self) -> bool {
        !matches!(self, Self::Png)
    }
}
