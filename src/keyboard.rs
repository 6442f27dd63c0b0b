use minifb::Key;

/// Pressed flags for the 16 keypad keys 0x0..=0xF. Written by the input
/// collaborator, read by the skip and wait-for-key opcodes.
#[derive(Debug, Clone, Default)]
pub struct Keyboard {
    keys: [bool; 16],
}

impl Keyboard {
    pub fn new() -> Self {
        Self { keys: [false; 16] }
    }

    /// Marks `key` pressed; true if it was released before.
    pub fn press(&mut self, key: u8) -> bool {
        let slot = &mut self.keys[(key & 0xF) as usize];
        let transitioned = !*slot;
        *slot = true;
        transitioned
    }

    pub fn release(&mut self, key: u8) {
        self.keys[(key & 0xF) as usize] = false;
    }

    // only the low nibble names a key
    pub fn get_key_status_from_num(&self, n: u8) -> bool {
        self.keys[(n & 0xF) as usize]
    }

    pub fn snapshot(&self) -> [bool; 16] {
        self.keys
    }
}

/// # Keymap
/// The hex keypad is laid over the left-hand block of a QWERTY keyboard.
/// ```text
/// |1|2|3|C|      |1|2|3|4|
/// |4|5|6|D|  ->  |Q|W|E|R|
/// |7|8|9|E|  ->  |A|S|D|F|
/// |A|0|B|F|      |Z|X|C|V|
/// ```
pub fn key_to_num(key: Key) -> Option<u8> {
    match key {
        Key::Key1 => Some(0x1),
        Key::Key2 => Some(0x2),
        Key::Key3 => Some(0x3),
        Key::Key4 => Some(0xC),
        Key::Q => Some(0x4),
        Key::W => Some(0x5),
        Key::E => Some(0x6),
        Key::R => Some(0xD),
        Key::A => Some(0x7),
        Key::S => Some(0x8),
        Key::D => Some(0x9),
        Key::F => Some(0xE),
        Key::Z => Some(0xA),
        Key::X => Some(0x0),
        Key::C => Some(0xB),
        Key::V => Some(0xF),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_reports_transitions_only() {
        let mut kb = Keyboard::new();
        assert!(kb.press(0xA));
        assert!(!kb.press(0xA));
        assert!(kb.get_key_status_from_num(0xA));
        kb.release(0xA);
        assert!(!kb.get_key_status_from_num(0xA));
        assert!(kb.press(0xA));
    }

    #[test]
    fn keymap_covers_all_sixteen_keys() {
        #[rustfmt::skip]
        let keys = [
            Key::Key1, Key::Key2, Key::Key3, Key::Key4,
            Key::Q, Key::W, Key::E, Key::R,
            Key::A, Key::S, Key::D, Key::F,
            Key::Z, Key::X, Key::C, Key::V,
        ];
        let mut seen: Vec<u8> = keys.iter().filter_map(|&k| key_to_num(k)).collect();
        seen.sort_unstable();
        assert_eq!(seen, (0x0..=0xF).collect::<Vec<u8>>());
        assert_eq!(key_to_num(Key::Escape), None);
    }
}
