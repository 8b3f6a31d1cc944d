//! File Templates
//!
//! Fixed text surrounding the generated program: the crate header with the
//! Mynewt imports, and the runtime trailer that boots the OS, calls
//! `on_start`, starts the background task and runs the event loop.

pub const HEADER: &str = r#"//! Generated from blocks. Edits will be overwritten.
#![no_std]                              //  Don't link with standard Rust library, which is not compatible with embedded systems
#![feature(trace_macros)]               //  Allow macro tracing: `trace_macros!(true)`
#![feature(concat_idents)]              //  Allow `concat_idents!()` macro used in `coap!()` macro
#![feature(proc_macro_hygiene)]         //  Allow proc macros to be unhygienic

extern crate cortex_m;                  //  Declare the external library `cortex_m`
extern crate mynewt;                    //  Declare the Mynewt library
extern crate macros as mynewt_macros;   //  Declare the Mynewt Procedural Macros library

use core::panic::PanicInfo;             //  Import `PanicInfo` type which is used by `panic()` below
use cortex_m::asm::bkpt;                //  Import cortex_m assembly function to inject breakpoint
use mynewt::{
    result::*,                          //  Import Mynewt result and error types
    hw::gpio,                           //  Import Mynewt GPIO API
    kernel::os,                         //  Import Mynewt OS API
    sys::console,                       //  Import Mynewt Console API
    fill_zero, out, Ptr, Strn, NULL,    //  Import Mynewt macros and types
};
use mynewt_macros::{init_strn, strn};   //  Import Mynewt procedural macros
"#;

pub const TRAILER: &str = r#"///  main() will be called at Mynewt startup. It replaces the C version of the `main()` function.
#[no_mangle]                 //  Don't mangle the name "main"
extern "C" fn main() -> ! {  //  Declare `extern "C"` because it will be called by Mynewt
    //  Initialise Mynewt OS.
    unsafe { base::rust_sysinit(); console_flush() };

    //  Initialise the app.
    on_start()
        .expect("on_start fail");

    //  Start the background task.
    start_task()
        .expect("background task fail");

    //  Main event loop
    loop {                                //  Loop forever...
        unsafe {
            os::os_eventq_run(            //  Process events...
                os::os_eventq_dflt_get()  //  From default event queue.
            )
        }
    }
    //  Never comes here.
}

///  This function is called on panic, like an assertion failure. We display the filename and line number and pause in the debugger.
#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    //  Display the filename and line number to the Semihosting Console.
    if let Some(location) = info.location() {
        let file = location.file();
        let line = location.line();
        console::print("panic at ");
        console::buffer(&file);
        console::print(" line 0x");
        console::printhex(line as u8);
        console::print("\n");
        console::flush();
    } else {
        console::print("panic unknown loc\n");
        console::flush();
    }
    //  Pause in the debugger.
    bkpt();
    //  Loop forever so that device won't restart.
    loop {}
}
"#;
