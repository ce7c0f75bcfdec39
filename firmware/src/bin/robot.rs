// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Robot node: ultrasonic ranger, MPU-6050 and dual H-bridge on one STM32F767.

#![no_main]
#![no_std]

use core::cell::RefCell;

use cortex_m::interrupt::Mutex;
use cortex_m::peripheral::NVIC;
use cortex_m_rt::entry;
use defmt_rtt as _;
use panic_halt as _;

use hal::{
    gpio::{gpiob, Edge, ExtiPin, Floating, Input},
    i2c::{BlockingI2c, Mode},
    pac::{self, interrupt},
    prelude::*,
    serial::{Config, Serial},
};
use stm32f7xx_hal as hal;

use redbot::config::{RobotConfig, LINK_BAUD_RATE, PWM_CLOCK, RANGING_CLOCK};
use redbot::node::RobotNode;
use redbot::sensors::{DistanceSensor, RangeFinder};
use redbot_firmware::drivers::bridge::{DirectionPair, DualBridge};
use redbot_firmware::drivers::Mpu6050;
use redbot_firmware::hw::{CounterTimer, CycleDelay, DualPwm, OutPin, RobotPins, SerialPort};

type Ranger = RangeFinder<CounterTimer, OutPin<'B', 1>, CycleDelay>;
type EchoPin = gpiob::PB3<Input<Floating>>;

static RANGER: Mutex<RefCell<Option<Ranger>>> = Mutex::new(RefCell::new(None));
static ECHO: Mutex<RefCell<Option<EchoPin>>> = Mutex::new(RefCell::new(None));

/// Main-loop handle on the interrupt-shared range finder.
struct SharedRanger;

impl DistanceSensor for SharedRanger {
    type Error = ();

    fn distance_cm(&mut self) -> Result<u16, ()> {
        cortex_m::interrupt::free(|cs| {
            match RANGER.borrow(cs).borrow_mut().as_mut() {
                Some(ranger) => ranger.get_distance_cm().map_err(|_| ()),
                None => Err(()),
            }
        })
    }
}

#[entry]
fn main() -> ! {
    // Peripherals
    let dp = pac::Peripherals::take().unwrap();

    // Clocks: 16 MHz HSI, which the timer constants assume
    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.freeze();
    let mut apb1 = rcc.apb1;
    let mut apb2 = rcc.apb2;
    let delay = CycleDelay::new(clocks.sysclk().raw());

    let pins = RobotPins::new(dp.GPIOB, dp.GPIOD, dp.GPIOE);

    // USART2 link to the remote
    let link_cfg = Config {
        baud_rate: LINK_BAUD_RATE.bps(),
        ..Default::default()
    };
    let serial = Serial::new(dp.USART2, (pins.link.tx, pins.link.rx), &clocks, link_cfg);
    let link = SerialPort::new(serial);

    // Motors
    let pwm = DualPwm::tim4(dp.TIM4, PWM_CLOCK);
    let bridge = DualBridge::new(
        pwm,
        DirectionPair::new(pins.bridge.left_fwd, pins.bridge.left_rev),
        DirectionPair::new(pins.bridge.right_fwd, pins.bridge.right_rev),
    );

    // Accelerometer on I2C1
    let i2c = BlockingI2c::i2c1(
        dp.I2C1,
        (pins.i2c1.scl, pins.i2c1.sda),
        Mode::standard(100.kHz()),
        &clocks,
        &mut apb1,
        50_000,
    );
    let mut mpu = Mpu6050::new(i2c);
    if let Err(e) = mpu.init() {
        defmt::error!("mpu6050 init failed: {}", defmt::Debug2Format(&e));
    }

    // Ranger: TIM3 counts the echo width, EXTI3 sees both echo edges
    let timer = CounterTimer::tim3(dp.TIM3, RANGING_CLOCK);
    let mut ranger = RangeFinder::new(timer, RANGING_CLOCK, OutPin::new(pins.ranger.trigger), delay);
    if ranger.init().is_err() {
        defmt::error!("ranger: trigger line stuck");
    }

    let mut syscfg = dp.SYSCFG;
    let mut exti = dp.EXTI;
    let mut echo = pins.ranger.echo;
    echo.make_interrupt_source(&mut syscfg, &mut apb2);
    echo.trigger_on_edge(&mut exti, Edge::RisingFalling);
    echo.enable_interrupt(&mut exti);

    cortex_m::interrupt::free(|cs| {
        *RANGER.borrow(cs).borrow_mut() = Some(ranger);
        *ECHO.borrow(cs).borrow_mut() = Some(echo);
    });

    unsafe {
        NVIC::unmask(pac::Interrupt::TIM3);
        NVIC::unmask(pac::Interrupt::EXTI3);
    }

    let mut node = RobotNode::new(link, bridge, SharedRanger, mpu, delay, RobotConfig::DEFAULT);

    #[cfg(feature = "jingle")]
    {
        let mut jingle_delay = delay;
        let _ = redbot::motors::jingle::play(
            node.actuator(),
            &mut jingle_delay,
            redbot::motors::jingle::THEME,
        );
    }

    defmt::info!("robot: running");
    node.run()
}

#[interrupt]
fn TIM3() {
    CounterTimer::clear_overflow_flag();
    cortex_m::interrupt::free(|cs| {
        if let Some(ranger) = RANGER.borrow(cs).borrow().as_ref() {
            ranger.on_timer_overflow();
        }
    });
}

#[interrupt]
fn EXTI3() {
    cortex_m::interrupt::free(|cs| {
        let mut echo = ECHO.borrow(cs).borrow_mut();
        let Some(echo) = echo.as_mut() else {
            return;
        };
        echo.clear_interrupt_pending_bit();
        let high = echo.is_high();
        if let Some(ranger) = RANGER.borrow(cs).borrow_mut().as_mut() {
            ranger.on_echo_edge(high);
        }
    });
}
