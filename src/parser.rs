use std::collections::VecDeque;

use log::warn;

use crate::{datatypes::*, error::*};

/// Groups a stream of sections into datasets, validating the order of the
/// sections on the way.
///
/// Items are indices into the section stream. A dataset is only yielded once
/// the End Section of its message has been seen, so that every index carries
/// the position of Section 8.
///
/// An error inside a message drops the datasets of that message and is kept
/// as a [`MessageError`]; the following messages are read as usual. Fatal
/// errors and errors at the start of a message end the stream.
pub(crate) struct Grib2DatasetIndexStream<'cacher, I>
where
    I: Iterator,
{
    iter: I,
    sect_cacher: Option<&'cacher mut Vec<SectionInfo>>,
    state: Grib2DatasetValidatorState,
    pos: usize,
    next_pos: usize,
    message_count: usize,
    message: MessageState,
    ready: VecDeque<Grib2DatasetIndex>,
    message_errors: Vec<MessageError>,
}

/// Indices of sections seen so far in the current message.
#[derive(Default)]
struct MessageState {
    offset: usize,
    sect0: usize,
    sect1: usize,
    sect2: Option<usize>,
    sect3: Option<usize>,
    sect4: usize,
    sect5: usize,
    bitmap_source: Option<usize>,
    last_bitmap: Option<usize>,
    sect6: usize,
    datasets: Vec<Grib2DatasetIndex>,
}

impl<'cacher, I> Grib2DatasetIndexStream<'cacher, I>
where
    I: Iterator,
{
    pub(crate) fn new(iter: I) -> Self {
        Self {
            iter,
            sect_cacher: None,
            state: Grib2DatasetValidatorState::StartOfMessage,
            pos: 0,
            next_pos: 0,
            message_count: 0,
            message: Default::default(),
            ready: VecDeque::new(),
            message_errors: Vec::new(),
        }
    }

    pub(crate) fn with_cacher(mut self, cacher: &'cacher mut Vec<SectionInfo>) -> Self {
        self.sect_cacher = Some(cacher);
        self
    }

    /// Returns the errors of the messages that were skipped so far.
    pub(crate) fn into_message_errors(self) -> Vec<MessageError> {
        self.message_errors
    }

    fn cache_sect(&mut self, sect: SectionInfo) {
        if let Some(cacher) = self.sect_cacher.as_mut() {
            cacher.push(sect);
        }
    }

    fn fail(&mut self, e: ParseError) -> Option<Result<Grib2DatasetIndex, ParseError>> {
        self.state = Grib2DatasetValidatorState::EndOfStream;
        self.ready.clear();
        Some(Err(e))
    }

    fn reject_message(&mut self, error: ParseError) {
        let msg = std::mem::take(&mut self.message);
        let error = MessageError {
            message: self.message_count,
            offset: msg.offset,
            error,
        };
        warn!("{error}");
        self.message_errors.push(error);
        self.message_count += 1;
    }

    fn accept(&mut self, pos: usize, sect: &SectionInfo) -> Result<(), ParseError> {
        use Grib2DatasetValidatorState::*;

        let msg = &mut self.message;
        match (self.state, sect.num) {
            (SkippingMessage, 8) => {
                self.state = StartOfMessage;
                return Ok(());
            }
            (SkippingMessage, _) => return Ok(()),
            (StartOfMessage, 0) => {
                *msg = MessageState {
                    offset: sect.offset,
                    sect0: pos,
                    ..Default::default()
                };
            }
            (EndOfSect(0), 1) => msg.sect1 = pos,
            (EndOfSect(1) | EndOfSect(7), 2) => msg.sect2 = Some(pos),
            (EndOfSect(1) | EndOfSect(2) | EndOfSect(7), 3) => msg.sect3 = Some(pos),
            (EndOfSect(1) | EndOfSect(7), 4) if msg.sect3.is_none() => {
                return Err(ParseError::NoGridDefinition(pos));
            }
            (EndOfSect(1) | EndOfSect(3) | EndOfSect(7), 4) => msg.sect4 = pos,
            (EndOfSect(4), 5) => msg.sect5 = pos,
            (EndOfSect(5), 6) => {
                msg.sect6 = pos;
                msg.bitmap_source = match bitmap_indicator(sect) {
                    BitMap::BITMAP_FOLLOWS => {
                        msg.last_bitmap = Some(pos);
                        Some(pos)
                    }
                    BitMap::PREVIOUSLY_DEFINED => msg.last_bitmap,
                    _ => None,
                };
            }
            (EndOfSect(6), 7) => {
                let sect3 = msg.sect3.ok_or(ParseError::NoGridDefinition(pos))?;
                let index = Grib2DatasetIndex {
                    message: (self.message_count, msg.datasets.len()),
                    sect0: msg.sect0,
                    sect1: msg.sect1,
                    sect2: msg.sect2,
                    sect3,
                    sect4: msg.sect4,
                    sect5: msg.sect5,
                    sect6: msg.sect6,
                    sect7: pos,
                    sect8: 0,
                    bitmap_source: msg.bitmap_source,
                };
                msg.datasets.push(index);
            }
            (EndOfSect(7), 8) => {
                for mut index in msg.datasets.drain(..) {
                    index.sect8 = pos;
                    self.ready.push_back(index);
                }
                self.message_count += 1;
                self.state = StartOfMessage;
                return Ok(());
            }
            _ => return Err(ParseError::InvalidSectionOrder(pos)),
        }
        self.state = EndOfSect(sect.num);
        Ok(())
    }
}

fn bitmap_indicator(sect: &SectionInfo) -> u8 {
    match &sect.body {
        Some(SectionBody::Section6(bitmap)) => bitmap.bitmap_indicator,
        _ => BitMap::NOT_APPLIED,
    }
}

impl<I> Iterator for Grib2DatasetIndexStream<'_, I>
where
    I: Iterator<Item = Result<SectionInfo, ParseError>>,
{
    type Item = Result<Grib2DatasetIndex, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        use Grib2DatasetValidatorState::*;

        loop {
            if let Some(index) = self.ready.pop_front() {
                return Some(Ok(index));
            }

            if self.state == EndOfStream {
                return None;
            }

            match self.iter.next() {
                None => {
                    if self.state == StartOfMessage {
                        self.state = EndOfStream;
                        return None;
                    }
                    return self.fail(ParseError::UnexpectedEndOfData(self.pos));
                }
                Some(Err(e)) => {
                    if self.state == StartOfMessage || e.is_fatal() {
                        return self.fail(e);
                    }
                    if self.state != SkippingMessage {
                        self.reject_message(e);
                    }
                    // the section stream resumes at the next message
                    self.state = StartOfMessage;
                }
                Some(Ok(sect)) => {
                    let pos = self.next_pos;
                    self.next_pos += 1;
                    self.pos = pos;
                    let num = sect.num;
                    let result = self.accept(pos, &sect);
                    self.cache_sect(sect);
                    if let Err(e) = result {
                        if self.state == StartOfMessage {
                            return self.fail(e);
                        }
                        self.reject_message(e);
                        self.state = if num == 8 {
                            StartOfMessage
                        } else {
                            SkippingMessage
                        };
                    }
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Grib2DatasetValidatorState {
    StartOfMessage,
    EndOfSect(u8),
    SkippingMessage,
    EndOfStream,
}
