//! Recording interface shared by the unit tests

use alloc::vec::Vec;
use embedded_hal::delay::DelayNs;

use crate::config::{Builder, Config, Dimensions};
use crate::interface::DisplayInterface;

/// One transfer seen by the mock
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Frame {
    Commands(Vec<u8>),
    Data(Vec<u8>),
}

#[derive(Debug, Default)]
pub struct MockInterface {
    pub frames: Vec<Frame>,
    pub resets: usize,
}

impl MockInterface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every command stream, in order
    pub fn commands(&self) -> Vec<Vec<u8>> {
        self.frames
            .iter()
            .filter_map(|frame| match frame {
                Frame::Commands(bytes) => Some(bytes.clone()),
                Frame::Data(_) => None,
            })
            .collect()
    }

    /// Every data stream, in order
    pub fn data(&self) -> Vec<Vec<u8>> {
        self.frames
            .iter()
            .filter_map(|frame| match frame {
                Frame::Data(bytes) => Some(bytes.clone()),
                Frame::Commands(_) => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }
}

impl DisplayInterface for MockInterface {
    type Error = core::convert::Infallible;

    fn send_commands(&mut self, commands: &[u8]) -> Result<(), Self::Error> {
        self.frames.push(Frame::Commands(commands.to_vec()));
        Ok(())
    }

    fn send_data(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.frames.push(Frame::Data(data.to_vec()));
        Ok(())
    }

    fn reset<D: DelayNs>(&mut self, _delay: &mut D) -> Result<(), Self::Error> {
        self.resets += 1;
        Ok(())
    }
}

pub struct MockDelay;

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

pub fn config(width: u8, height: u8) -> Config {
    Builder::new()
        .dimensions(Dimensions::new(width, height).unwrap())
        .build()
        .unwrap()
}
