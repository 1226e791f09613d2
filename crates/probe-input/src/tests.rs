use crate::test::{build_test_data, ChunkedSource, FailingSource};
use crate::{InputError, ProbeInput};
use assert_matches::assert_matches;
use std::io::Read;

fn input_over(len: usize, chunk_len: usize) -> ProbeInput<ChunkedSource> {
    ProbeInput::new(ChunkedSource::new(build_test_data(len), chunk_len))
}

#[test]
fn zero_length_requests_touch_nothing() {
    let mut input = input_over(9, 3);
    assert_matches!(input.read(&mut []), Ok(Some(0)));
    assert_matches!(input.peek(&mut []), Ok(Some(0)));
    assert_matches!(input.skip(0), Ok(Some(0)));
    assert_matches!(input.read_fully(&mut []), Ok(()));
    assert_matches!(input.peek_fully(&mut []), Ok(()));
    assert_matches!(input.skip_fully(0), Ok(()));
    assert_matches!(input.advance_peek_position(0), Ok(()));
    assert_eq!(input.get_ref().pulls(), 0);
    assert_eq!(input.position(), 0);
}

#[test]
fn read_returns_source_sized_chunks() {
    let mut input = input_over(9, 3);
    let mut target = [0u8; 9];
    assert_matches!(input.read(&mut target), Ok(Some(3)));
    assert_matches!(input.read(&mut target), Ok(Some(3)));
    assert_matches!(input.read(&mut target), Ok(Some(3)));
    assert_eq!(input.position(), 9);
    assert_matches!(input.read(&mut target), Ok(None));
}

#[test]
fn summed_reads_reconstruct_the_stream() {
    let data = build_test_data(29);
    let mut input = ProbeInput::new(ChunkedSource::new(data.clone(), 4));
    let mut out = Vec::new();
    let mut target = [0u8; 3];
    loop {
        match input.read(&mut target).unwrap() {
            Some(n) => out.extend_from_slice(&target[..n]),
            None => break,
        }
    }
    assert_eq!(out, data);
    assert_eq!(input.position(), data.len() as u64);
}

#[test]
fn peek_is_idempotent_read_ahead() {
    let mut direct = input_over(16, 5);
    let mut peeked = input_over(16, 5);

    let mut expected = [0u8; 12];
    direct.read_fully(&mut expected).unwrap();

    let mut ahead = [0u8; 12];
    peeked.peek_fully(&mut ahead).unwrap();
    assert_eq!(ahead, expected);
    assert_eq!(peeked.position(), 0);
    assert_eq!(peeked.peek_position(), 12);

    let mut actual = [0u8; 12];
    peeked.read_fully(&mut actual).unwrap();
    assert_eq!(actual, expected);
    assert_eq!(peeked.position(), 12);
}

#[test]
fn reset_reexposes_the_buffered_region() {
    let mut input = input_over(16, 16);
    input.advance_peek_position(5).unwrap();
    assert_eq!(input.peek_position(), 5);

    input.reset_peek_position();
    assert_eq!(input.peek_position(), 0);

    let mut target = [0u8; 5];
    input.peek_fully(&mut target).unwrap();
    assert_eq!(target, build_test_data(5).as_slice());
}

#[test]
fn skipping_peeked_bytes_issues_no_io() {
    let mut input = input_over(16, 16);
    input.peek_fully(&mut [0u8; 6]).unwrap();
    let pulls = input.get_ref().pulls();

    input.skip_fully(6).unwrap();
    assert_eq!(input.get_ref().pulls(), pulls);
    assert_eq!(input.position(), 6);
}

#[test]
fn exact_read_to_the_end_then_clean_then_hard_eof() {
    let mut input = input_over(9, 3);
    input.read_fully(&mut [0u8; 9]).unwrap();
    assert_eq!(input.position(), 9);

    assert_matches!(input.read_fully_or_eof(&mut [0u8; 1]), Ok(false));
    assert_matches!(
        input.read_fully(&mut [0u8; 1]),
        Err(InputError::UnexpectedEof { position: 9 })
    );
}

#[test]
fn overlong_exact_read_fails_without_committing() {
    let mut input = input_over(9, 3);
    assert_matches!(
        input.read_fully(&mut [0u8; 10]),
        Err(InputError::UnexpectedEof { position: 0 })
    );
    assert_eq!(input.position(), 0);
}

#[test]
fn clean_eof_is_reported_at_most_once() {
    let mut input = input_over(9, 3);
    assert_matches!(input.peek_fully_or_eof(&mut [0u8; 9]), Ok(true));
    assert_matches!(input.peek_fully_or_eof(&mut [0u8; 1]), Ok(false));
    assert_matches!(
        input.peek_fully_or_eof(&mut [0u8; 1]),
        Err(InputError::UnexpectedEof { .. })
    );
}

#[test]
fn advance_peek_hits_the_same_eof_wall() {
    let mut input = input_over(9, 9);
    assert_matches!(input.advance_peek_position_or_eof(9), Ok(true));
    assert_matches!(input.advance_peek_position_or_eof(1), Ok(false));
    assert_matches!(
        input.advance_peek_position_or_eof(1),
        Err(InputError::UnexpectedEof { .. })
    );
}

#[test]
fn plain_operations_keep_returning_the_sentinel() {
    let mut input = input_over(6, 6);
    input.read_fully(&mut [0u8; 6]).unwrap();

    assert_matches!(input.read(&mut [0u8; 2]), Ok(None));
    assert_matches!(input.read(&mut [0u8; 2]), Ok(None));
    assert_matches!(input.skip(2), Ok(None));
    assert_matches!(input.peek(&mut [0u8; 2]), Ok(None));
    assert_matches!(input.read_fully(&mut []), Ok(()));
}

#[test]
fn skip_walks_buffered_then_source() {
    let mut input = input_over(9, 3);
    assert_matches!(input.skip(9), Ok(Some(3)));
    input.skip_fully(6).unwrap();
    assert_eq!(input.position(), 9);

    assert_matches!(input.skip_fully_or_eof(1), Ok(false));
    assert_matches!(input.skip_fully(1), Err(InputError::UnexpectedEof { .. }));
}

#[test]
fn read_drains_buffered_bytes_then_pulls_the_remainder() {
    let mut input = input_over(16, 16);
    input.peek_fully(&mut [0u8; 4]).unwrap();
    let pulls = input.get_ref().pulls();

    let mut target = [0u8; 8];
    assert_matches!(input.read(&mut target), Ok(Some(8)));
    assert_eq!(target, build_test_data(8).as_slice());
    assert_eq!(input.get_ref().pulls(), pulls + 1);
    assert_eq!(input.position(), 8);
    assert_eq!(input.peek_position(), 8);
}

#[test]
fn read_serves_buffered_tail_before_reporting_eof() {
    let mut input = input_over(4, 4);
    input.peek_fully(&mut [0u8; 4]).unwrap();

    let mut target = [0u8; 8];
    assert_matches!(input.read(&mut target), Ok(Some(4)));
    assert_eq!(input.position(), 4);
    assert_matches!(input.read(&mut target), Ok(None));
}

#[test]
fn peek_cursor_survives_interleaved_reads() {
    let data = build_test_data(16);
    let mut input = ProbeInput::new(ChunkedSource::new(data.clone(), 16));

    input.peek_fully(&mut [0u8; 6]).unwrap();
    input.read_fully(&mut [0u8; 2]).unwrap();
    assert_eq!(input.position(), 2);
    assert_eq!(input.peek_position(), 6);

    let mut target = [0u8; 2];
    input.peek_fully(&mut target).unwrap();
    assert_eq!(target, data[6..8]);
    assert_eq!(input.peek_position(), 8);
}

#[test]
fn failed_peek_keeps_short_tail_readable() {
    let mut input = input_over(5, 5);
    assert_matches!(
        input.peek_fully(&mut [0u8; 8]),
        Err(InputError::UnexpectedEof { .. })
    );
    assert_eq!(input.peek_position(), 0);

    let mut target = [0u8; 5];
    input.read_fully(&mut target).unwrap();
    assert_eq!(target, build_test_data(5).as_slice());
}

#[test]
fn source_errors_propagate_without_committing() {
    let mut input = ProbeInput::new(FailingSource::new(build_test_data(4)));
    assert_matches!(input.read_fully(&mut [0u8; 8]), Err(InputError::Io(_)));
    assert_eq!(input.position(), 0);
    assert_matches!(input.read(&mut [0u8; 2]), Err(InputError::Io(_)));
}

#[test]
fn initial_position_offsets_both_cursors() {
    let mut input = ProbeInput::with_position(ChunkedSource::new(build_test_data(6), 6), 100);
    assert_eq!(input.position(), 100);
    assert_eq!(input.peek_position(), 100);

    input.read_fully(&mut [0u8; 4]).unwrap();
    assert_eq!(input.position(), 104);
    assert_matches!(
        input.read_fully(&mut [0u8; 3]),
        Err(InputError::UnexpectedEof { position: 104 })
    );
}

#[test]
fn std_read_glue_consumes_the_committed_stream() {
    let data = build_test_data(40);
    let mut input = ProbeInput::new(ChunkedSource::new(data.clone(), 7));
    input.peek_fully(&mut [0u8; 10]).unwrap();

    let mut out = Vec::new();
    input.read_to_end(&mut out).unwrap();
    assert_eq!(out, data);
}
