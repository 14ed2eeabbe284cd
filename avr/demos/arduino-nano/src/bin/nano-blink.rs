#![no_std]
#![no_main]

use arduino_blink::BlinkConfig;
use panic_halt as _;

const BLINK: BlinkConfig = BlinkConfig::DEFAULT;

#[arduino_blink::entry]
fn main() -> ! {
    let dp = arduino_blink::Peripherals::take().unwrap();

    #[cfg(feature = "serial-log")]
    {
        use arduino_blink::prelude::*;

        let mut serial = arduino_blink::default_serial!(dp, 57600);
        ufmt::uwriteln!(
            &mut serial,
            "blink: {} toggles every {}\r",
            arduino_blink::LED_NAME,
            BLINK
        )
        .unwrap_infallible();
        serial.flush();
    }

    let led = arduino_blink::led!(dp);
    arduino_blink::run(led, BLINK)
}
