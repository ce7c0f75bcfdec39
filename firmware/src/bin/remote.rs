// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Remote node: joystick, confirm button and status panel on one STM32F767.

#![no_main]
#![no_std]

use cortex_m_rt::entry;
use defmt_rtt as _;
use panic_halt as _;

use hal::{
    pac,
    prelude::*,
    serial::{Config, Serial},
};
use stm32f7xx_hal as hal;

use redbot::config::{RemoteConfig, LINK_BAUD_RATE};
use redbot::node::RemoteNode;
use redbot_firmware::drivers::StatusPanel;
use redbot_firmware::hw::{Adc, CycleDelay, Led, PullUpPin, RemotePins, SerialPort, Usart};

#[entry]
fn main() -> ! {
    // Peripherals
    let dp = pac::Peripherals::take().unwrap();

    // Clocks
    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.freeze();
    let delay = CycleDelay::new(clocks.sysclk().raw());

    let pins = RemotePins::new(dp.GPIOA, dp.GPIOB, dp.GPIOD, dp.GPIOE);

    // USART2 link to the robot
    let link_cfg = Config {
        baud_rate: LINK_BAUD_RATE.bps(),
        ..Default::default()
    };
    let serial = Serial::new(dp.USART2, (pins.link.tx, pins.link.rx), &clocks, link_cfg);
    let link = SerialPort::new(serial);

    // USART3 (DBG)
    let console_cfg = Config {
        baud_rate: 115_200.bps(),
        ..Default::default()
    };
    let console = Serial::new(
        dp.USART3,
        (pins.console.tx, pins.console.rx),
        &clocks,
        console_cfg,
    );

    let mut panel = StatusPanel::new(
        Usart::new(console),
        Led::active_high(pins.leds.green),
        Led::active_high(pins.leds.yellow),
        Led::active_high(pins.leds.red),
    );
    panel.splash();

    // Stick pins are already analog; ADC1 reads IN0/IN1 directly
    let _stick = pins.stick;
    let adc = Adc::adc1(dp.ADC1);
    let button = PullUpPin::new(pins.button);

    let mut node = RemoteNode::new(link, adc, button, panel, delay, RemoteConfig::DEFAULT).unwrap();

    defmt::info!("remote: running");
    node.run()
}
