use std::io::{self, Read, Seek, SeekFrom};

use log::{debug, trace};

use crate::{
    context::ReadOptions,
    datatypes::*,
    def::grib2::ParseContext,
    error::*,
};

pub(crate) const SECT0_IS_MAGIC: &[u8] = b"GRIB";
pub(crate) const SECT0_IS_SIZE: usize = 16;
pub(crate) const SECT8_ES_MAGIC: &[u8] = b"7777";
pub(crate) const SECT8_ES_SIZE: usize = SECT8_ES_MAGIC.len();

/// Low-level reads of GRIB2 sections from a seekable byte source.
pub trait Grib2Read: Read + Seek {
    /// Reads Section 0 at the current position. Returns `Ok(None)` when the
    /// source ends cleanly before a new message.
    fn read_sect0(&mut self) -> Result<Option<Indicator>, ParseError> {
        let mut buf = [0; SECT0_IS_SIZE];
        if !self.read_exact_or_eof(&mut buf)? {
            return Ok(None);
        }

        if &buf[..SECT0_IS_MAGIC.len()] != SECT0_IS_MAGIC {
            return Err(ParseError::NotGRIB);
        }
        let version = buf[7];
        if version != 2 {
            return Err(ParseError::GRIBVersionMismatch(version));
        }

        let mut len = [0; 8];
        len.copy_from_slice(&buf[8..16]);
        Ok(Some(Indicator {
            discipline: buf[6],
            total_length: u64::from_be_bytes(len),
        }))
    }

    fn read_sect8(&mut self) -> Result<(), ParseError> {
        let mut buf = [0; SECT8_ES_SIZE];
        self.read_exact(&mut buf[..])?;

        if buf[..] != SECT8_ES_MAGIC[..] {
            return Err(ParseError::EndSectionMismatch);
        }

        Ok(())
    }

    /// Reads the common header of sections 1-7 and returns the section size
    /// and number.
    fn read_sect_header(&mut self) -> Result<(usize, u8), ParseError> {
        let mut buf = [0; SECT_HEADER_SIZE];
        self.read_exact(&mut buf[..])?;

        let size = u32::from_be_bytes([buf[0], buf[1], buf[2], buf[3]]) as usize;
        Ok((size, buf[4]))
    }

    fn read_payload(&mut self, size: usize) -> Result<Box<[u8]>, ParseError> {
        let mut buf = vec![0; size];
        self.read_exact(&mut buf[..])?;
        Ok(buf.into_boxed_slice())
    }

    fn skip_payload(&mut self, size: usize) -> Result<(), ParseError> {
        self.seek(SeekFrom::Current(size as i64))?;
        Ok(())
    }

    /// Reads the payload of an already located section, wherever the cursor
    /// currently is.
    fn read_sect_payload_at(&mut self, sect: &SectionInfo) -> Result<Box<[u8]>, ParseError> {
        let (offset, size) = sect.payload_range();
        self.seek(SeekFrom::Start(offset as u64))?;
        self.read_payload(size)
    }

    /// Fills `buf` completely. Returns `Ok(false)` if the source is already
    /// at its end; a partial fill is an error.
    fn read_exact_or_eof(&mut self, buf: &mut [u8]) -> Result<bool, ParseError> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.read(&mut buf[filled..]) {
                Ok(0) if filled == 0 => return Ok(false),
                Ok(0) => return Err(ParseError::UnexpectedEndOfData(filled)),
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(true)
    }
}

pub struct SeekableGrib2Reader<R> {
    reader: R,
}

impl<R> SeekableGrib2Reader<R> {
    pub fn new(r: R) -> Self {
        Self { reader: r }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read> Read for SeekableGrib2Reader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> io::Result<()> {
        self.reader.read_exact(buf)
    }
}

impl<S: Seek> Seek for SeekableGrib2Reader<S> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.reader.seek(pos)
    }
}

impl<R: Read + Seek> Grib2Read for SeekableGrib2Reader<R> {}

impl<R: Grib2Read + ?Sized> Grib2Read for &mut R {}

/// An iterator over the sections of all messages in a byte source.
///
/// Sections 1 to 5 are parsed into their bodies. Only the indicator of
/// Section 6 is read and Section 7 is skipped; their payloads are read when
/// values are decoded.
///
/// An error inside a message is yielded and the stream resumes at the end
/// the message declares in Section 0. The stream ends after a
/// [fatal](ParseError::is_fatal) error or an error in Section 0.
pub struct Grib2SectionStream<R> {
    reader: R,
    options: ReadOptions,
    ctx: ParseContext,
    message_start: usize,
    whole_size: usize,
    rest_size: usize,
    done: bool,
}

impl<R> Grib2SectionStream<R> {
    pub fn new(reader: R) -> Self {
        Self::with_options(reader, ReadOptions::default())
    }

    pub fn with_options(reader: R, options: ReadOptions) -> Self {
        Self {
            reader,
            options,
            ctx: ParseContext {
                discipline: 0,
                centre: 0,
                local_tables: options.local_tables,
            },
            message_start: 0,
            whole_size: 0,
            rest_size: 0,
            done: false,
        }
    }

    pub fn into_reader(self) -> R {
        self.reader
    }

    fn offset(&self) -> usize {
        self.message_start + self.whole_size - self.rest_size
    }
}

impl<R: Grib2Read> Grib2SectionStream<R> {
    fn next_sect0(&mut self) -> Result<Option<SectionInfo>, ParseError> {
        let Some(indicator) = self.reader.read_sect0()? else {
            return Ok(None);
        };
        let whole_size = usize::try_from(indicator.total_length)
            .map_err(|_| ParseError::MessageLengthMismatch(self.message_start))?;
        if whole_size < SECT0_IS_SIZE + SECT8_ES_SIZE {
            return Err(ParseError::MessageLengthMismatch(self.message_start));
        }
        self.whole_size = whole_size;
        self.rest_size = whole_size - SECT0_IS_SIZE;
        self.ctx.discipline = indicator.discipline;
        self.ctx.centre = 0;
        debug!(
            "message at {}: discipline {}, {} octets",
            self.message_start, indicator.discipline, whole_size
        );

        Ok(Some(SectionInfo {
            num: 0,
            offset: self.message_start,
            size: SECT0_IS_SIZE,
            body: Some(SectionBody::Section0(indicator)),
        }))
    }

    /// Moves to the end of the current message. Returns `false` if no
    /// message is being read or the end cannot be reached.
    fn skip_message(&mut self) -> bool {
        if self.whole_size == 0 {
            return false;
        }
        let end = self.message_start + self.whole_size;
        if self.reader.seek(SeekFrom::Start(end as u64)).is_err() {
            return false;
        }
        debug!(
            "skipped the rest of the message at {}, resuming at {end}",
            self.message_start
        );
        self.message_start = end;
        self.whole_size = 0;
        self.rest_size = 0;
        true
    }

    fn next_sect8(&mut self) -> Result<SectionInfo, ParseError> {
        let offset = self.offset();
        self.reader.read_sect8()?;
        trace!("section 8 at {offset}");
        self.message_start += self.whole_size;
        self.whole_size = 0;
        self.rest_size = 0;

        Ok(SectionInfo {
            num: 8,
            offset,
            size: SECT8_ES_SIZE,
            body: Some(SectionBody::Section8),
        })
    }

    fn next_sect(&mut self) -> Result<SectionInfo, ParseError> {
        let offset = self.offset();
        if self.rest_size < SECT_HEADER_SIZE + SECT8_ES_SIZE {
            return Err(ParseError::MessageLengthMismatch(self.message_start));
        }
        let (size, num) = self.reader.read_sect_header()?;
        if size < SECT_HEADER_SIZE {
            return Err(ParseError::SectionSizeTooSmall(offset));
        }
        if size > self.rest_size - SECT8_ES_SIZE {
            return Err(ParseError::MessageLengthMismatch(self.message_start));
        }

        let body_size = size - SECT_HEADER_SIZE;
        let strict = self.options.strict_section_length;
        let body = match num {
            1 => {
                let sect = Identification::from_payload(self.reader.read_payload(body_size)?)?;
                self.ctx.centre = sect.centre_id();
                SectionBody::Section1(sect)
            }
            2 => SectionBody::Section2(LocalUse::from_payload(
                self.reader.read_payload(body_size)?,
            )),
            3 => {
                let payload = self.reader.read_payload(body_size)?;
                SectionBody::Section3(GridDefinition::from_payload(&payload, strict)?)
            }
            4 => {
                let payload = self.reader.read_payload(body_size)?;
                SectionBody::Section4(ProdDefinition::from_payload(&payload, &self.ctx, strict)?)
            }
            5 => {
                let payload = self.reader.read_payload(body_size)?;
                SectionBody::Section5(ReprDefinition::from_payload(&payload, strict)?)
            }
            6 => {
                if body_size < 1 {
                    return Err(ParseError::SectionSizeTooSmall(offset));
                }
                let mut buf = [0; 1];
                self.reader.read_exact(&mut buf)?;
                self.reader.skip_payload(body_size - 1)?;
                SectionBody::Section6(BitMap {
                    bitmap_indicator: buf[0],
                })
            }
            7 => {
                self.reader.skip_payload(body_size)?;
                SectionBody::Section7
            }
            _ => return Err(ParseError::UnknownSectionNumber(num)),
        };
        self.rest_size -= size;

        let sect = SectionInfo {
            num,
            offset,
            size,
            body: Some(body),
        };
        match sect.get_tmpl_code() {
            Some(tmpl) => debug!("section {num} at {offset} ({size} octets): template {tmpl}"),
            None => trace!("section {num} at {offset} ({size} octets)"),
        }
        Ok(sect)
    }
}

impl<R: Grib2Read> Iterator for Grib2SectionStream<R> {
    type Item = Result<SectionInfo, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = if self.rest_size == 0 {
            self.next_sect0().transpose()?
        } else if self.rest_size == SECT8_ES_SIZE {
            self.next_sect8()
        } else {
            self.next_sect()
        };

        if let Err(e) = &result {
            if e.is_fatal() || !self.skip_message() {
                self.done = true;
            }
        }
        Some(result)
    }
}
