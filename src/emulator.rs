use std::time::Instant;

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{
    config::{Config, Quirks},
    decode::{AluOp, OpCode},
    display::FrameBuffer,
    error::{Chip8Error, Result},
    keyboard::Keyboard,
    memory::{glyph_addr, Memory, TypeAddr},
    registers::{Register, Registers},
    timer::{Timer, TimerClock},
};

/// What a call to [`Emulator::step`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Executed(OpCode),
    /// FX0A is pending; nothing was fetched.
    AwaitingKey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunState {
    Running,
    AwaitingKey(Register),
}

/// The whole machine: memory, registers, display, keypad and timers.
pub struct Emulator {
    fb: FrameBuffer,
    pub regs: Registers,
    pub mem: Memory,
    keyboard: Keyboard,
    pub delay_timer: Timer,
    pub sound_timer: Timer,
    clock: TimerClock,
    rng: StdRng,
    quirks: Quirks,
    state: RunState,
}

impl Emulator {
    pub fn new(config: &Config) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            fb: FrameBuffer::new(),
            regs: Registers::new(),
            mem: Memory::new(),
            keyboard: Keyboard::new(),
            delay_timer: Timer::new(0),
            sound_timer: Timer::new(0),
            clock: TimerClock::new(Instant::now()),
            rng,
            quirks: config.quirks,
            state: RunState::Running,
        }
    }

    pub fn with_rom(config: &Config, rom: &[u8]) -> Result<Self> {
        let mut emu = Self::new(config);
        emu.mem.load_rom(rom)?;
        Ok(emu)
    }

    pub fn fetch_decode(&self) -> Result<OpCode> {
        let ins = self.mem.instruction_at_pc();
        OpCode::decode_raw(ins, self.mem.pc.0)
    }

    /// Runs one instruction, or nothing while waiting on FX0A.
    pub fn step(&mut self) -> Result<StepOutcome> {
        if self.is_awaiting_key() {
            return Ok(StepOutcome::AwaitingKey);
        }

        let operation = self.fetch_decode()?;
        trace!(
            "{:#05x}: {:04x} {}",
            self.mem.pc.0,
            self.mem.instruction_at_pc(),
            operation
        );
        self.execute_ins(operation)?;
        Ok(StepOutcome::Executed(operation))
    }

    /// Executes `ins` as if fetched from the current program counter. On error
    /// the machine is left as it was before the instruction. Does nothing while
    /// FX0A is pending.
    pub fn execute_ins(&mut self, ins: OpCode) -> Result<()> {
        if self.is_awaiting_key() {
            debug!("ignoring {} while waiting for key", ins);
            return Ok(());
        }
        let pc = self.mem.pc.0;
        self.mem.increment_pc();
        let result = self.apply(ins, pc);
        if result.is_err() {
            self.mem.set_pc(pc);
        }
        result
    }

    // pc already points at the next instruction; `pc` is this one
    fn apply(&mut self, ins: OpCode, pc: TypeAddr) -> Result<()> {
        match ins {
            OpCode::ClearScreen => {
                self.fb.clear_buffer();
            }
            OpCode::PopSubroutine => {
                let addr = self
                    .mem
                    .stack
                    .pop()
                    .ok_or(Chip8Error::StackUnderflow { pc })?;
                self.mem.set_pc(addr);
                debug!("return to {:#05x}, depth {}", addr, self.mem.stack.depth());
            }
            OpCode::Jump(addr) => {
                self.mem.set_pc(addr);
            }
            OpCode::PushSubroutine(addr) => {
                // store the instruction after the call to return back to
                self.mem
                    .stack
                    .push(self.mem.pc.0)
                    .map_err(|_| Chip8Error::StackOverflow { pc })?;
                self.mem.set_pc(addr);
                debug!("call {:#05x}, depth {}", addr, self.mem.stack.depth());
            }
            OpCode::SkipEqualConstant(vx, nn) => {
                if self.regs.get(vx) == nn {
                    self.mem.increment_pc();
                }
            }
            OpCode::SkipNotEqualConstant(vx, nn) => {
                if self.regs.get(vx) != nn {
                    self.mem.increment_pc();
                }
            }
            OpCode::SkipEqualRegister(vx, vy) => {
                if self.regs.get(vx) == self.regs.get(vy) {
                    self.mem.increment_pc();
                }
            }
            OpCode::SkipNotEqualRegister(vx, vy) => {
                if self.regs.get(vx) != self.regs.get(vy) {
                    self.mem.increment_pc();
                }
            }
            OpCode::SetRegister(vx, nn) => {
                self.regs.set_register(vx, nn);
            }
            OpCode::AddToRegister(vx, nn) => {
                self.regs.add_to_register(vx, nn);
            }
            OpCode::Alu(op, vx, vy) => self.alu(op, vx, vy),
            OpCode::SetIndexRegister(addr) => self.mem.set_index(addr),
            OpCode::JumpWithOffset(addr) => {
                self.mem
                    .set_pc(addr.wrapping_add(self.regs.get(Register::V0) as u16));
            }
            OpCode::Random(vx, nn) => {
                let ransuu: u8 = self.rng.gen();
                self.regs.set_register(vx, nn & ransuu);
            }
            OpCode::Display(reg_x, reg_y, height) => {
                let (x, y) = (self.regs.get(reg_x), self.regs.get(reg_y));
                // From I to I + N, plot at VX, VY
                let index = self.mem.index.0;
                let mut rows = [0u8; 15];
                let sprite = &mut rows[..height as usize];
                for (row, slot) in sprite.iter_mut().enumerate() {
                    *slot = self.mem.get(index.wrapping_add(row as u16));
                }

                let collision = self.fb.paint(x, y, sprite);
                self.regs.set_flag(collision);
            }
            OpCode::SkipIfPressed(vx) => {
                if self.keyboard.get_key_status_from_num(self.regs.get(vx)) {
                    self.mem.increment_pc();
                }
            }
            OpCode::SkipIfNotPressed(vx) => {
                if !self.keyboard.get_key_status_from_num(self.regs.get(vx)) {
                    self.mem.increment_pc();
                }
            }
            OpCode::CopyDelayToRegister(vx) => self.regs.set_register(vx, self.delay_timer.count),
            OpCode::GetKey(vx) => {
                // hold the pc on this instruction until a key goes down
                self.mem.set_pc(pc);
                self.state = RunState::AwaitingKey(vx);
                debug!("waiting for key into {}", vx);
            }
            OpCode::CopyRegisterToDelay(vx) => self.delay_timer.set(self.regs.get(vx)),
            OpCode::CopyRegisterToSound(vx) => self.sound_timer.set(self.regs.get(vx)),
            OpCode::AddToIndex(vx) => {
                self.mem.index.add(self.regs.get(vx));
            }
            OpCode::PointChar(vx) => {
                self.mem.set_index(glyph_addr(self.regs.get(vx)));
            }
            OpCode::ToDecimal(vx) => {
                let value = self.regs.get(vx);
                let digits = [value / 100, value / 10 % 10, value % 10];
                let index = self.mem.index.0;
                for (i, digit) in digits.into_iter().enumerate() {
                    self.mem.set(index.wrapping_add(i as u16), digit);
                }
            }
            OpCode::StoreRegisterToMemory(vx) => {
                let index = self.mem.index.0;
                for reg in vx.range_inclusive() {
                    self.mem
                        .set(index.wrapping_add(reg.index() as u16), self.regs.get(reg));
                }
                self.advance_index_after_transfer(vx);
            }
            OpCode::LoadRegisterFromMemory(vx) => {
                let index = self.mem.index.0;
                for reg in vx.range_inclusive() {
                    let reg_val = self.mem.get(index.wrapping_add(reg.index() as u16));
                    self.regs.set_register(reg, reg_val);
                }
                self.advance_index_after_transfer(vx);
            }
        }
        Ok(())
    }

    // destination first, flag last: VF holds the flag even when X is F
    fn alu(&mut self, op: AluOp, vx: Register, vy: Register) {
        let (x, y) = (self.regs.get(vx), self.regs.get(vy));
        let shift_source = if self.quirks.shift_uses_vy { y } else { x };

        let (result, flag) = match op {
            AluOp::Copy => (y, None),
            AluOp::Or => (x | y, None),
            AluOp::And => (x & y, None),
            AluOp::XOr => (x ^ y, None),
            AluOp::Add => {
                let (sum, carry) = x.overflowing_add(y);
                (sum, Some(carry))
            }
            AluOp::SubtractForward => {
                let (diff, borrow) = x.overflowing_sub(y);
                (diff, Some(!borrow))
            }
            AluOp::SubtractBackward => {
                let (diff, borrow) = y.overflowing_sub(x);
                (diff, Some(!borrow))
            }
            AluOp::RightShift => (shift_source >> 1, Some(shift_source & 1 == 1)),
            AluOp::LeftShift => (shift_source << 1, Some(shift_source >> 7 == 1)),
        };

        self.regs.set_register(vx, result);
        if let Some(flag) = flag {
            self.regs.set_flag(flag);
        }
    }

    fn advance_index_after_transfer(&mut self, vx: Register) {
        if self.quirks.load_store_increments_index {
            let touched = vx.index() as u16 + 1;
            let index = self.mem.index.0.wrapping_add(touched);
            self.mem.set_index(index);
        }
    }

    pub fn is_awaiting_key(&self) -> bool {
        matches!(self.state, RunState::AwaitingKey(_))
    }

    /// A key went down. Completes a pending FX0A if the key was up before.
    pub fn key_down(&mut self, key: u8) {
        if !self.keyboard.press(key) {
            return;
        }
        if let RunState::AwaitingKey(vx) = self.state {
            self.regs.set_register(vx, key & 0xF);
            self.mem.increment_pc();
            self.state = RunState::Running;
            debug!("key {:X} resumed execution into {}", key & 0xF, vx);
        }
    }

    pub fn key_up(&mut self, key: u8) {
        self.keyboard.release(key);
    }

    pub fn keys(&self) -> [bool; 16] {
        self.keyboard.snapshot()
    }

    /// Decrements both timers by the 60 Hz periods elapsed since the last sync.
    pub fn sync_timers(&mut self, now: Instant) {
        let ticks = self.clock.sync(now);
        self.tick_timers(ticks);
    }

    pub fn tick_timers(&mut self, ticks: u32) {
        self.delay_timer.decrement(ticks);
        self.sound_timer.decrement(ticks);
    }

    pub fn sound_active(&self) -> bool {
        self.sound_timer.is_active()
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.fb
    }

    /// True once after every clear or draw.
    pub fn take_redraw(&mut self) -> bool {
        self.fb.take_dirty()
    }

    pub fn dump_registers(&self) -> String {
        format!(
            "pc={:#05x} i={:#05x} sp={} dt={} st={} v={:02x?}",
            self.mem.pc.0,
            self.mem.index.0,
            self.mem.stack.depth(),
            self.delay_timer.count,
            self.sound_timer.count,
            self.regs.as_slice()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::WIDTH;
    use crate::memory::STACK_DEPTH;
    use std::time::Duration;

    fn reg(i: u8) -> Register {
        Register::new(i).unwrap()
    }

    fn emulator() -> Emulator {
        Emulator::new(&Config {
            seed: Some(7),
            ..Config::default()
        })
    }

    fn run(emu: &mut Emulator, word: u16) {
        let op = OpCode::decode_raw(word, emu.mem.pc.0).unwrap();
        emu.execute_ins(op).unwrap();
    }

    #[test]
    fn test_00e0_cls() {
        let mut emu = emulator();
        emu.fb.paint(0, 0, &[0xFF]);
        run(&mut emu, 0x00E0);
        assert_eq!(emu.frame().lit_count(), 0);
        assert_eq!(emu.mem.pc.0, 0x202);
    }

    #[test]
    fn test_call_and_return_round_trip() {
        let mut emu = emulator();
        let depth = emu.mem.stack.depth();
        run(&mut emu, 0x2ABC);
        assert_eq!(emu.mem.pc.0, 0xABC);
        assert_eq!(emu.mem.stack.depth(), depth + 1);
        run(&mut emu, 0x00EE);
        assert_eq!(emu.mem.pc.0, 0x202);
        assert_eq!(emu.mem.stack.depth(), depth);
    }

    #[test]
    fn test_return_with_empty_stack_is_fatal() {
        let mut emu = emulator();
        let err = emu.execute_ins(OpCode::PopSubroutine).unwrap_err();
        assert_eq!(err, Chip8Error::StackUnderflow { pc: 0x200 });
        assert_eq!(emu.mem.pc.0, 0x200);
    }

    #[test]
    fn test_seventeenth_call_overflows() {
        let mut emu = emulator();
        for _ in 0..STACK_DEPTH {
            run(&mut emu, 0x2300);
        }
        let err = emu.execute_ins(OpCode::PushSubroutine(0x300)).unwrap_err();
        assert_eq!(err, Chip8Error::StackOverflow { pc: 0x300 });
        assert_eq!(emu.mem.stack.depth(), STACK_DEPTH);
        assert_eq!(emu.mem.pc.0, 0x300);
    }

    #[test]
    fn test_skips() {
        let mut emu = emulator();
        emu.regs.set_register(reg(1), 0x11);
        run(&mut emu, 0x3111);
        assert_eq!(emu.mem.pc.0, 0x204);
        run(&mut emu, 0x4111);
        assert_eq!(emu.mem.pc.0, 0x206);
        run(&mut emu, 0x5120);
        assert_eq!(emu.mem.pc.0, 0x208);
        run(&mut emu, 0x9120);
        assert_eq!(emu.mem.pc.0, 0x20C);
    }

    #[test]
    fn test_8xy0_to_8xy3_leave_vf_alone() {
        for (word, expected) in [(0x8120, 0x0C), (0x8121, 0x3E), (0x8122, 0x08), (0x8123, 0x36)] {
            let mut emu = emulator();
            emu.regs.set_register(reg(1), 0x3A);
            emu.regs.set_register(reg(2), 0x0C);
            emu.regs.set_register(Register::FLAG, 0x77);
            run(&mut emu, word);
            assert_eq!(emu.regs.get(reg(1)), expected, "{word:#06x}");
            assert_eq!(emu.regs.get(reg(2)), 0x0C);
            assert_eq!(emu.regs.get(Register::FLAG), 0x77, "{word:#06x}");
        }
    }

    #[test]
    fn test_7xnn_wraps_without_flag() {
        let mut emu = emulator();
        emu.regs.set_register(reg(2), 0xFF);
        run(&mut emu, 0x7202);
        assert_eq!(emu.regs.get(reg(2)), 0x01);
        assert_eq!(emu.regs.get(Register::FLAG), 0);
    }

    #[test]
    fn test_8xy4_carry() {
        let mut emu = emulator();
        emu.regs.set_register(reg(1), 0xFF);
        emu.regs.set_register(reg(2), 0x11);
        run(&mut emu, 0x8124);
        assert_eq!(emu.regs.get(reg(1)), 0x10);
        assert_eq!(emu.regs.get(Register::FLAG), 1);
    }

    #[test]
    fn test_8xy5_and_8xy7_borrow() {
        let mut emu = emulator();
        emu.regs.set_register(reg(1), 0x11);
        emu.regs.set_register(reg(2), 0x12);
        run(&mut emu, 0x8125);
        assert_eq!(emu.regs.get(reg(1)), 0xFF);
        assert_eq!(emu.regs.get(Register::FLAG), 0);

        emu.regs.set_register(reg(1), 0x11);
        run(&mut emu, 0x8127);
        assert_eq!(emu.regs.get(reg(1)), 0x01);
        assert_eq!(emu.regs.get(Register::FLAG), 1);
    }

    #[test]
    fn test_sub_of_register_from_itself_sets_no_borrow() {
        let mut emu = emulator();
        emu.regs.set_register(reg(4), 0x80);
        run(&mut emu, 0x8445);
        assert_eq!(emu.regs.get(reg(4)), 0);
        assert_eq!(emu.regs.get(Register::FLAG), 1);
    }

    #[test]
    fn test_flag_wins_when_destination_is_vf() {
        let mut emu = emulator();
        emu.regs.set_register(Register::FLAG, 0xFF);
        emu.regs.set_register(reg(1), 0x01);
        run(&mut emu, 0x8F14);
        assert_eq!(emu.regs.get(Register::FLAG), 1);
    }

    #[test]
    fn test_shifts() {
        let mut emu = emulator();
        emu.regs.set_register(reg(1), 0x05);
        run(&mut emu, 0x8106);
        assert_eq!(emu.regs.get(reg(1)), 0x02);
        assert_eq!(emu.regs.get(Register::FLAG), 1);

        emu.regs.set_register(reg(1), 0x81);
        run(&mut emu, 0x810E);
        assert_eq!(emu.regs.get(reg(1)), 0x02);
        assert_eq!(emu.regs.get(Register::FLAG), 1);
    }

    #[test]
    fn test_shift_quirk_reads_vy() {
        let mut emu = Emulator::new(&Config {
            quirks: Quirks {
                shift_uses_vy: true,
                ..Quirks::default()
            },
            ..Config::default()
        });
        emu.regs.set_register(reg(1), 0xFF);
        emu.regs.set_register(reg(2), 0x04);
        run(&mut emu, 0x8126);
        assert_eq!(emu.regs.get(reg(1)), 0x02);
        assert_eq!(emu.regs.get(Register::FLAG), 0);
    }

    #[test]
    fn test_bnnn_adds_v0() {
        let mut emu = emulator();
        emu.regs.set_register(Register::V0, 0x2);
        run(&mut emu, 0xBABC);
        assert_eq!(emu.mem.pc.0, 0xABE);
    }

    #[test]
    fn test_cxnn_is_masked_and_seeded() {
        let mut a = emulator();
        let mut b = emulator();
        for _ in 0..8 {
            run(&mut a, 0xC10F);
            run(&mut b, 0xC10F);
            assert_eq!(a.regs.get(reg(1)), b.regs.get(reg(1)));
            assert_eq!(a.regs.get(reg(1)) & 0xF0, 0);
        }
    }

    #[test]
    fn test_dxyn_draws_font_glyph() {
        let mut emu = emulator();
        emu.regs.set_register(reg(0), 1);
        run(&mut emu, 0xF029);
        // V0 doubles as both coordinates
        run(&mut emu, 0xD005);
        // glyph "1" is 0x20 0x60 0x20 0x20 0x70, drawn at (1, 1)
        assert!(emu.frame().is_on(3, 1));
        assert!(emu.frame().is_on(2, 2) && emu.frame().is_on(3, 2));
        assert!(emu.frame().is_on(2, 5) && emu.frame().is_on(4, 5));
        assert_eq!(emu.regs.get(Register::FLAG), 0);
        assert!(emu.take_redraw());
    }

    #[test]
    fn test_dxyn_wraps_at_bottom_right() {
        let mut emu = emulator();
        emu.regs.set_register(reg(1), 60);
        emu.regs.set_register(reg(2), 30);
        emu.mem.set(0x300, 0xFF);
        emu.mem.set_index(0x300);
        run(&mut emu, 0xD121);
        let row = &emu.frame().pixels()[30];
        let lit: Vec<usize> = (0..WIDTH).filter(|&x| row[x]).collect();
        assert_eq!(lit, vec![0, 1, 2, 3, 60, 61, 62, 63]);
        assert_eq!(emu.frame().lit_count(), 8);
    }

    #[test]
    fn test_dxyn_twice_erases_and_flags() {
        let mut emu = emulator();
        emu.mem.set_index(glyph_addr(0x8));
        run(&mut emu, 0xD125);
        assert_eq!(emu.regs.get(Register::FLAG), 0);
        run(&mut emu, 0xD125);
        assert_eq!(emu.regs.get(Register::FLAG), 1);
        assert_eq!(emu.frame().lit_count(), 0);
    }

    #[test]
    fn test_key_skips() {
        let mut emu = emulator();
        emu.regs.set_register(reg(1), 0xE);
        run(&mut emu, 0xE19E);
        assert_eq!(emu.mem.pc.0, 0x202);
        run(&mut emu, 0xE1A1);
        assert_eq!(emu.mem.pc.0, 0x206);

        emu.key_down(0xE);
        assert!(emu.keys()[0xE]);
        run(&mut emu, 0xE19E);
        assert_eq!(emu.mem.pc.0, 0x20A);
        run(&mut emu, 0xE1A1);
        assert_eq!(emu.mem.pc.0, 0x20C);

        emu.key_up(0xE);
        assert_eq!(emu.keys(), [false; 16]);
    }

    #[test]
    fn test_fx0a_suspends_until_key_transition() {
        let mut emu = emulator();
        emu.mem.load_rom(&[0xF3, 0x0A, 0x12, 0x00]).unwrap();
        emu.key_down(0x5); // held before the wait: not a transition
        assert_eq!(emu.step().unwrap(), StepOutcome::Executed(OpCode::GetKey(reg(3))));
        assert!(emu.is_awaiting_key());
        assert_eq!(emu.mem.pc.0, 0x200);

        assert_eq!(emu.step().unwrap(), StepOutcome::AwaitingKey);
        emu.key_down(0x5);
        assert!(emu.is_awaiting_key());

        emu.key_up(0x5);
        emu.key_down(0x5);
        assert!(!emu.is_awaiting_key());
        assert_eq!(emu.regs.get(reg(3)), 0x5);
        assert_eq!(emu.mem.pc.0, 0x202);
        assert_eq!(emu.step().unwrap(), StepOutcome::Executed(OpCode::Jump(0x200)));
    }

    #[test]
    fn test_execute_ins_is_ignored_during_key_wait() {
        let mut emu = emulator();
        emu.mem.load_rom(&[0xF1, 0x0A, 0x60, 0x01, 0x61, 0x02]).unwrap();
        emu.step().unwrap();
        emu.execute_ins(OpCode::SetRegister(reg(0), 9)).unwrap();
        assert!(emu.is_awaiting_key());
        assert_eq!(emu.mem.pc.0, 0x200);
        assert_eq!(emu.regs.get(reg(0)), 0);

        emu.key_down(0x3);
        assert_eq!(emu.mem.pc.0, 0x202);
        assert_eq!(emu.step().unwrap(), StepOutcome::Executed(OpCode::SetRegister(reg(0), 1)));
        assert_eq!(emu.regs.get(reg(0)), 1);
        assert_eq!(emu.regs.get(reg(1)), 3);
    }

    #[test]
    fn test_timer_opcodes() {
        let mut emu = emulator();
        emu.regs.set_register(reg(1), 0x0F);
        run(&mut emu, 0xF115);
        run(&mut emu, 0xF118);
        assert!(emu.sound_active());
        emu.tick_timers(5);
        run(&mut emu, 0xF207);
        assert_eq!(emu.regs.get(reg(2)), 0x0A);
        emu.tick_timers(20);
        assert_eq!(emu.delay_timer.count, 0);
        assert!(!emu.sound_active());
    }

    #[test]
    fn test_sync_timers_follows_wall_clock() {
        let mut emu = emulator();
        let start = Instant::now();
        emu.clock = TimerClock::new(start);
        emu.delay_timer.set(40);
        emu.sound_timer.set(20);

        emu.sync_timers(start + Duration::from_millis(500));
        assert_eq!(emu.delay_timer.count, 10);
        assert_eq!(emu.sound_timer.count, 0);
        assert!(!emu.sound_active());

        // under one period: no tick, remainder carried
        emu.sync_timers(start + Duration::from_millis(510));
        assert_eq!(emu.delay_timer.count, 10);
        emu.sync_timers(start + Duration::from_millis(520));
        assert_eq!(emu.delay_timer.count, 9);
    }

    #[test]
    fn test_fx1e_wraps_at_16_bits() {
        let mut emu = emulator();
        emu.mem.set_index(0xFFFF);
        emu.regs.set_register(reg(1), 0x02);
        run(&mut emu, 0xF11E);
        assert_eq!(emu.mem.index.0, 0x0001);
        assert_eq!(emu.regs.get(Register::FLAG), 0);
    }

    #[test]
    fn test_fx29_uses_low_nibble() {
        let mut emu = emulator();
        emu.regs.set_register(reg(1), 0x2B);
        run(&mut emu, 0xF129);
        assert_eq!(emu.mem.index.0, glyph_addr(0xB));
    }

    #[test]
    fn test_fx33_bcd() {
        let mut emu = emulator();
        emu.regs.set_register(reg(1), 255);
        emu.mem.set_index(0x300);
        run(&mut emu, 0xF133);
        assert_eq!(&emu.mem.as_slice()[0x300..0x303], &[2, 5, 5]);
    }

    #[test]
    fn test_fx55_fx65_touch_v0_to_vx() {
        let mut emu = emulator();
        for i in 0..16 {
            emu.regs.set_register(reg(i), i + 1);
        }
        emu.mem.set_index(0x300);
        run(&mut emu, 0xF355);
        assert_eq!(&emu.mem.as_slice()[0x300..0x305], &[1, 2, 3, 4, 0]);
        assert_eq!(emu.mem.index.0, 0x300);

        emu.mem.set(0x300, 0xAA);
        emu.mem.set(0x304, 0xBB);
        run(&mut emu, 0xF365);
        assert_eq!(emu.regs.get(reg(0)), 0xAA);
        assert_eq!(emu.regs.get(reg(3)), 4);
        assert_eq!(emu.regs.get(reg(4)), 5);
    }

    #[test]
    fn test_load_store_quirk_advances_index() {
        let mut emu = Emulator::new(&Config {
            quirks: Quirks {
                load_store_increments_index: true,
                ..Quirks::default()
            },
            ..Config::default()
        });
        emu.mem.set_index(0x300);
        run(&mut emu, 0xF355);
        assert_eq!(emu.mem.index.0, 0x304);
    }

    #[test]
    fn test_step_reports_decode_errors() {
        let mut emu = emulator();
        emu.mem.load_rom(&[0xFF, 0xFF]).unwrap();
        assert_eq!(
            emu.step(),
            Err(Chip8Error::Decode {
                word: 0xFFFF,
                pc: 0x200
            })
        );
    }
}
