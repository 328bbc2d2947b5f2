#![no_main]
use libfuzzer_sys::fuzz_target;

// Fuzz the interpreter with arbitrary bytecode.
//
// Safety guarantee: executing arbitrary bytecode must NEVER panic.
// Every failure (gas deficit, invalid opcode, stack bounds) must come
// back as a halted frame state, not an unwrap/unreachable panic.
fuzz_target!(|data: &[u8]| {
    use kestrel::evm::code::Code;
    use kestrel::evm::frame::{Frame, FrameState};
    use kestrel::evm::interpreter;

    // First 32 bytes double as calldata, the rest is code.
    let (calldata, bytecode) = if data.len() >= 32 {
        (&data[..32], &data[32..])
    } else {
        (data, data)
    };

    // Run the same bytes as legacy code and as an EOF container so the
    // version-gated opcodes get exercised both ways.
    for code in [
        Code::legacy(bytecode.to_vec()),
        Code::eof(bytecode.to_vec(), 1, vec![Code::legacy(vec![0x00])]),
    ] {
        // Budget: 1M gas keeps pathological EXP chains bounded.
        let mut frame = Frame::new(&code, calldata, calldata, 1_000_000);
        interpreter::run(&mut frame);

        // A finished frame is never still running, and a halted frame
        // has no gas left.
        match frame.state() {
            FrameState::Running => panic!("interpreter returned a running frame"),
            FrameState::Halted(_) => assert_eq!(frame.gas.remaining(), 0),
            _ => {}
        }
    }
});
