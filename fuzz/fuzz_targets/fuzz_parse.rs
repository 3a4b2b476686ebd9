#![no_main]

use libfuzzer_sys::fuzz_target;
use phpobj_printer::{print_program, PrinterConfig};

fuzz_target!(|data: &[u8]| {
    let Ok(source) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(program) = phpobj_parser::parse(source) {
        let printed = print_program(&program, &PrinterConfig::default()).unwrap();
        // Printing is a pure function of the tree
        assert_eq!(printed, print_program(&program, &PrinterConfig::default()).unwrap());
    }
});
