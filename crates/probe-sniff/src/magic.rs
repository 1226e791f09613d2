pub(crate) const TS_PACKET_LEN: usize = 188;

pub(crate) fn is_flac(header: &[u8]) -> bool {
    infer::audio::is_flac(header)
}

pub(crate) fn is_ogg(header: &[u8]) -> bool {
    infer::audio::is_ogg(header)
}

pub(crate) fn is_wav(header: &[u8]) -> bool {
    infer::audio::is_wav(header)
}

// EBML magic, shared by Matroska and WebM containers.
pub(crate) fn is_matroska(header: &[u8]) -> bool {
    header.starts_with(&[0x1A, 0x45, 0xDF, 0xA3])
}

pub(crate) fn is_mp4(header: &[u8]) -> bool {
    infer::video::is_mp4(header) || infer::video::is_m4v(header) || infer::audio::is_m4a(header)
}

// A sync byte at the start of three consecutive packets.
pub(crate) fn is_transport_stream(header: &[u8]) -> bool {
    header.len() > 2 * TS_PACKET_LEN
        && header[0] == 0x47
        && header[TS_PACKET_LEN] == 0x47
        && header[2 * TS_PACKET_LEN] == 0x47
}

pub(crate) fn is_mp3(header: &[u8]) -> bool {
    infer::audio::is_mp3(header)
}
