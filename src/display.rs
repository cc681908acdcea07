//! GC9A01 display driver, 240×240 round LCD over SPI with DMA.

use defmt::error;
use desk_clock_core::{
    Panel,
    config,
};
use embedded_graphics::{
    pixelcolor::Rgb565,
    prelude::*,
    primitives::Rectangle,
};
use embedded_hal_bus::spi::ExclusiveDevice;
use esp_hal::{
    Async,
    dma::{
        DmaRxBuf,
        DmaTxBuf,
    },
    dma_buffers,
    gpio::{
        Level,
        Output,
        OutputConfig,
    },
    spi::master::Spi,
    time::Rate,
};

use crate::{
    Backlight,
    DisplayResources,
    mk_static,
};

type SpiInterface<'a> = mipidsi::interface::SpiInterface<
    'a,
    ExclusiveDevice<esp_hal::spi::master::SpiDmaBus<'a, Async>, Output<'a>, esp_hal::delay::Delay>,
    Output<'a>,
>;

/// The clock's GC9A01 display, ready to draw on with `embedded-graphics`.
pub type Display<'a> = mipidsi::Display<SpiInterface<'a>, mipidsi::models::GC9A01, Output<'a>>;

impl<'a> From<DisplayResources<'a>> for Display<'a> {
    fn from(res: DisplayResources<'a>) -> Self {
        let (rx_buffer, rx_descriptors, tx_buffer, tx_descriptors) = dma_buffers!(32000);
        let dma_rx_buf = DmaRxBuf::new(rx_descriptors, rx_buffer).unwrap();
        let dma_tx_buf = DmaTxBuf::new(tx_descriptors, tx_buffer).unwrap();

        let mut delay = esp_hal::delay::Delay::new();

        let dc = Output::new(res.dc, Level::Low, OutputConfig::default());
        let mut rst = Output::new(res.rst, Level::Low, OutputConfig::default());
        rst.set_high();

        let spi = Spi::new(
            res.spi,
            esp_hal::spi::master::Config::default().with_frequency(Rate::from_mhz(80)),
        )
        .unwrap()
        .with_sck(res.sck)
        .with_mosi(res.mosi)
        .with_dma(res.dma)
        .with_buffers(dma_rx_buf, dma_tx_buf)
        .into_async();

        let cs = Output::new(res.cs, Level::High, OutputConfig::default());
        let spi_device = ExclusiveDevice::new(spi, cs, delay).unwrap();

        let buffer = mk_static!([u8; 32000], [0_u8; 32000]);
        let di = mipidsi::interface::SpiInterface::new(spi_device, dc, buffer);

        mipidsi::Builder::new(mipidsi::models::GC9A01, di)
            .reset_pin(rst)
            .display_size(config::WIDTH as u16, config::HEIGHT as u16)
            .invert_colors(mipidsi::options::ColorInversion::Inverted)
            .orientation(
                mipidsi::options::Orientation::new().rotate(mipidsi::options::Rotation::Deg90),
            )
            .init(&mut delay)
            .unwrap()
    }
}

/// The display and its backlight as one [`Panel`] for the clock's
/// framebuffer canvas.
pub struct ClockPanel {
    display: Display<'static>,
    backlight: Backlight,
}

impl ClockPanel {
    pub fn new(display: Display<'static>, backlight: Backlight) -> Self {
        Self { display, backlight }
    }
}

impl Panel for ClockPanel {
    fn flush(&mut self, pixels: &[Rgb565], size: Size) {
        let area = Rectangle::new(Point::zero(), size);
        if self
            .display
            .fill_contiguous(&area, pixels.iter().copied())
            .is_err()
        {
            error!("Display flush failed, frame dropped");
        }
    }

    fn set_backlight(&mut self, level: f32) {
        self.backlight.set_level(level);
    }
}
