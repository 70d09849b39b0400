use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "lavaplane",
    author,
    version,
    about = "Interactive lava plane shader viewer"
)]
pub struct Cli {
    /// Window size (e.g. `1280x720`).
    #[arg(long, value_name = "WIDTHxHEIGHT")]
    pub size: Option<String>,

    /// Initial animation speed multiplier.
    #[arg(long, value_name = "FACTOR", default_value_t = 0.5)]
    pub speed: f32,

    /// Start with the grain post-processing pass enabled.
    #[arg(long)]
    pub grain: bool,

    /// Enable verbose logging (equivalent to RUST_LOG=debug).
    #[arg(short, long)]
    pub verbose: bool,
}

pub fn parse() -> Cli {
    Cli::parse()
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum SizeParseError {
    #[error("expected WIDTHxHEIGHT format, e.g. 1280x720")]
    MissingSeparator,
    #[error("invalid width in size specification")]
    InvalidWidth,
    #[error("invalid height in size specification")]
    InvalidHeight,
    #[error("window dimensions must be greater than zero")]
    ZeroDimension,
}

pub fn parse_window_size(spec: &str) -> Result<(u32, u32), SizeParseError> {
    let trimmed = spec.trim();
    let (width, height) = trimmed
        .split_once(['x', 'X'])
        .ok_or(SizeParseError::MissingSeparator)?;

    let width: u32 = width
        .trim()
        .parse()
        .map_err(|_| SizeParseError::InvalidWidth)?;
    let height: u32 = height
        .trim()
        .parse()
        .map_err(|_| SizeParseError::InvalidHeight)?;

    if width == 0 || height == 0 {
        return Err(SizeParseError::ZeroDimension);
    }

    Ok((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_sizes() {
        assert_eq!(parse_window_size("1280x720"), Ok((1280, 720)));
        assert_eq!(parse_window_size(" 1920 X 1080 "), Ok((1920, 1080)));
    }

    #[test]
    fn rejects_malformed_sizes() {
        assert_eq!(
            parse_window_size("1280"),
            Err(SizeParseError::MissingSeparator)
        );
        assert_eq!(
            parse_window_size("wide x 720"),
            Err(SizeParseError::InvalidWidth)
        );
        assert_eq!(
            parse_window_size("1280x"),
            Err(SizeParseError::InvalidHeight)
        );
        assert_eq!(
            parse_window_size("1280x0"),
            Err(SizeParseError::ZeroDimension)
        );
    }
}
