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
        // USART1 is on the D0/D1 header, not on the USB connector
        ufmt::uwriteln!(
            &mut serial,
            "blink: {} toggles every {}\r",
            arduino_blink::LED_NAME,
            BLINK
        )
        .unwrap_infallible();
        serial.flush();
    }

    // The LED marked "L" sits on PC7, not on PB5 like on the Uno
    let led = arduino_blink::led!(dp);
    arduino_blink::run(led, BLINK)
}
