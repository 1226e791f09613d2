use probe_input::{InputError, ProbeInput, Source};
use tracing::debug;

mod magic;

// Transport streams need three sync bytes two packets apart to identify;
// everything else needs far less.
const SNIFF_WINDOW: usize = 2 * magic::TS_PACKET_LEN + 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum FormatKind {
    #[strum(serialize = "mp4")]
    Mp4,
    #[strum(serialize = "matroska")]
    Matroska,
    #[strum(serialize = "ogg")]
    Ogg,
    #[strum(serialize = "flac")]
    Flac,
    #[strum(serialize = "wav")]
    Wav,
    #[strum(serialize = "mp3")]
    Mp3,
    #[strum(serialize = "mpeg-ts")]
    TransportStream,
}

#[derive(Debug, thiserror::Error)]
pub enum SniffError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("empty input")]
    Empty,
    #[error("unrecognized format")]
    UnrecognizedFormat,
}

/// Identifies the container format from the leading bytes of `input`.
///
/// Detection only peeks: the read position is untouched, so the caller can
/// hand the stream to a real parser starting from the same offset. Sources
/// shorter than the sniff window are fine — detection runs over whatever
/// prefix exists.
pub fn detect_format<S: Source>(input: &mut ProbeInput<S>) -> Result<FormatKind, SniffError> {
    let mut window = [0u8; SNIFF_WINDOW];
    let mut filled = 0;
    while filled < SNIFF_WINDOW {
        match input.peek(&mut window[filled..])? {
            Some(n) => filled += n,
            None => break,
        }
    }
    input.reset_peek_position();

    if filled == 0 {
        return Err(SniffError::Empty);
    }
    let kind = sniff_header(&window[..filled]).ok_or(SniffError::UnrecognizedFormat)?;
    debug!("Detected {kind} stream");
    Ok(kind)
}

/// Runs the magic-byte checks over an already-buffered header slice,
/// most-specific first.
pub fn sniff_header(header: &[u8]) -> Option<FormatKind> {
    if magic::is_flac(header) {
        Some(FormatKind::Flac)
    } else if magic::is_ogg(header) {
        Some(FormatKind::Ogg)
    } else if magic::is_wav(header) {
        Some(FormatKind::Wav)
    } else if magic::is_matroska(header) {
        Some(FormatKind::Matroska)
    } else if magic::is_mp4(header) {
        Some(FormatKind::Mp4)
    } else if magic::is_transport_stream(header) {
        Some(FormatKind::TransportStream)
    } else if magic::is_mp3(header) {
        Some(FormatKind::Mp3)
    } else {
        None
    }
}
