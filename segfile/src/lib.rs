use byteorder::{ReadBytesExt, WriteBytesExt};
use std::fmt;
use std::fs::File;
use std::io::prelude::*;
use std::io::{BufReader, BufWriter};
use std::mem;
use std::path::Path;

pub type Endian = byteorder::LittleEndian;

/// Smallest usable stack region, in words. Images leaving less room
/// between `dataend` and the end of the data segment are grown on read.
pub const MINSTACKSIZE: u32 = 16;

/// A machine image as stored on disk: the raw code words, the initial
/// data words and the boundary between the data region and the stack.
///
/// Wire layout, all little-endian 32-bit:
///
/// | Offset | Content                      |
/// |--------|------------------------------|
/// | 0      | `textsize` (u32)             |
/// | 4      | `datasize` (u32)             |
/// | 8      | `dataend` (u32)              |
/// | 12     | `textsize` raw instructions  |
/// | ...    | `datasize` data words (i32)  |
#[derive(Debug, PartialEq)]
pub struct Image {
    text: Vec<u32>,
    data: Vec<i32>,
    dataend: u32,
}

impl Image {
    pub fn from(text: Vec<u32>, data: Vec<i32>, dataend: u32) -> Image {
        Image {
            text,
            data,
            dataend,
        }
    }

    pub fn copy_from(text: &[u32], data: &[i32], dataend: u32) -> Image {
        Image {
            text: Vec::from(text),
            data: Vec::from(data),
            dataend,
        }
    }

    pub fn text(&self) -> &[u32] {
        &self.text[..]
    }

    pub fn data(&self) -> &[i32] {
        &self.data[..]
    }

    pub fn dataend(&self) -> u32 {
        self.dataend
    }

    pub fn into_parts(self) -> (Vec<u32>, Vec<i32>, u32) {
        (self.text, self.data, self.dataend)
    }

    pub fn required_size(&self) -> usize {
        mem::size_of::<u32>() * (3 + self.text.len() + self.data.len())
    }
}

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    /// Header constraints violated: an empty code segment, or a data
    /// boundary past the end of the data segment.
    BadLayout {
        textsize: u32,
        datasize: u32,
        dataend: u32,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Io(err) => write!(f, "Erreur de lecture du programme : {}.", err),
            Error::BadLayout {
                textsize,
                datasize,
                dataend,
            } => write!(
                f,
                "Image invalide : textsize = {}, datasize = {}, dataend = {}.",
                textsize, datasize, dataend
            ),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}

/// Reads one image. Short reads surface as I/O errors; a header with no
/// code or with `dataend > datasize` is rejected. The data segment is
/// grown (zero-filled) to `dataend + MINSTACKSIZE` when the image leaves
/// less than `MINSTACKSIZE` words of stack room.
pub fn read<R: Read>(reader: &mut R) -> Result<Image, Error> {
    let textsize = reader.read_u32::<Endian>()?;
    let datasize = reader.read_u32::<Endian>()?;
    let dataend = reader.read_u32::<Endian>()?;

    if textsize == 0 || dataend > datasize {
        return Err(Error::BadLayout {
            textsize,
            datasize,
            dataend,
        });
    }

    let mut text = vec![0u32; textsize as usize];
    reader.read_u32_into::<Endian>(&mut text)?;

    let mut data = vec![0i32; datasize as usize];
    reader.read_i32_into::<Endian>(&mut data)?;

    let needed = dataend as usize + MINSTACKSIZE as usize;
    if data.len() < needed {
        data.resize(needed, 0);
    }

    Ok(Image::from(text, data, dataend))
}

/// Writes one image in the wire layout above.
pub fn write<W: Write>(writer: &mut W, image: &Image) -> Result<(), Error> {
    writer.write_u32::<Endian>(image.text.len() as u32)?;
    writer.write_u32::<Endian>(image.data.len() as u32)?;
    writer.write_u32::<Endian>(image.dataend)?;
    for &word in &image.text {
        writer.write_u32::<Endian>(word)?;
    }
    for &word in &image.data {
        writer.write_i32::<Endian>(word)?;
    }
    Ok(())
}

pub trait ReadSegExt: Read + Sized {
    fn read_seg(&mut self) -> Result<Image, Error> {
        read(self)
    }
}

impl<R: Read + Sized> ReadSegExt for R {}

pub trait WriteSegExt: Write + Sized {
    fn write_seg(&mut self, image: &Image) -> Result<(), Error> {
        write(self, image)
    }
}

impl<W: Write + Sized> WriteSegExt for W {}

pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Image, Error> {
    BufReader::new(File::open(path)?).read_seg()
}

pub fn write_file<P: AsRef<Path>>(path: P, image: &Image) -> Result<(), Error> {
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_seg(image)?;
    writer.flush()?;
    Ok(())
}
