//! Helvetica glyph metrics and WinAnsi text encoding.
//!
//! Widths are in thousandths of an em, taken from the Adobe core-14 AFM for
//! Helvetica. The PDF viewer substitutes its own Helvetica (or Arial), so
//! these widths must match the standard table exactly or wrapped lines will
//! overflow the right margin.
//!
//! Text is encoded to single-byte WinAnsi before layout, so every table is
//! indexed by encoded byte, not by `char`.

/// Glyph widths for WinAnsi bytes 0x20..=0xFF. Index = byte - 0x20.
///
/// Bytes with no WinAnsi glyph (0x7F, 0x81, 0x8D, 0x8F, 0x90, 0x9D) carry the
/// width of `?`; the encoder never emits them.
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 224] = [
    // 0x20..=0x2F  sp ! " # $ % & ' ( ) * + , - . /
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0x30..=0x3F  0-9 : ; < = > ?
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    // 0x40..=0x4F  @ A-O
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    // 0x50..=0x5F  P-Z [ \ ] ^ _
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    // 0x60..=0x6F  ` a-o
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    // 0x70..=0x7F  p-z { | } ~ (del)
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, 556,
    // 0x80..=0x8F  € - ‚ ƒ „ … † ‡ ˆ ‰ Š ‹ Œ - Ž -
    556, 556, 222, 556, 333, 1000, 556, 556, 333, 1000, 667, 333, 1000, 556, 611, 556,
    // 0x90..=0x9F  - ‘ ’ “ ” • – — ˜ ™ š › œ - ž Ÿ
    556, 222, 222, 333, 333, 350, 556, 1000, 333, 1000, 500, 333, 944, 556, 500, 667,
    // 0xA0..=0xAF  nbsp ¡ ¢ £ ¤ ¥ ¦ § ¨ © ª « ¬ shy ® ¯
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    // 0xB0..=0xBF  ° ± ² ³ ´ µ ¶ · ¸ ¹ º » ¼ ½ ¾ ¿
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    // 0xC0..=0xCF  À Á Â Ã Ä Å Æ Ç È É Ê Ë Ì Í Î Ï
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    // 0xD0..=0xDF  Ð Ñ Ò Ó Ô Õ Ö × Ø Ù Ú Û Ü Ý Þ ß
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    // 0xE0..=0xEF  à á â ã ä å æ ç è é ê ë ì í î ï
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278,
    // 0xF0..=0xFF  ð ñ ò ó ô õ ö ÷ ø ù ú û ü ý þ ÿ
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500,
];

/// Byte written for characters that have no WinAnsi code point.
pub const REPLACEMENT_BYTE: u8 = b'?';

/// Width of an encoded byte in thousandths of an em.
///
/// Control bytes other than newline never reach layout; they measure as zero.
pub fn glyph_width(byte: u8) -> u16 {
    if byte < 0x20 {
        0
    } else {
        HELVETICA_WIDTHS[(byte - 0x20) as usize]
    }
}

/// Width of an encoded run in thousandths of an em.
#[cfg(test)]
pub fn measure_bytes(bytes: &[u8]) -> u32 {
    bytes.iter().map(|&b| glyph_width(b) as u32).sum()
}

/// Encodes text as WinAnsi bytes.
///
/// `\n` is kept as a line break, `\r` is dropped and tabs become a single
/// space. Latin-1 characters map to themselves; the typographic characters
/// LLMs like to emit (curly quotes, dashes, bullets, ellipsis) map to their
/// WinAnsi slots. Anything else becomes [`REPLACEMENT_BYTE`].
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\r' => {}
            '\n' => out.push(b'\n'),
            '\t' => out.push(b' '),
            c => out.push(win_ansi_byte(c).unwrap_or(REPLACEMENT_BYTE)),
        }
    }
    out
}

fn win_ansi_byte(c: char) -> Option<u8> {
    let code = c as u32;
    match code {
        0x20..=0x7E | 0xA0..=0xFF => Some(code as u8),
        _ => match c {
            '€' => Some(0x80),
            '‚' => Some(0x82),
            'ƒ' => Some(0x83),
            '„' => Some(0x84),
            '…' => Some(0x85),
            '†' => Some(0x86),
            '‡' => Some(0x87),
            'ˆ' => Some(0x88),
            '‰' => Some(0x89),
            'Š' => Some(0x8A),
            '‹' => Some(0x8B),
            'Œ' => Some(0x8C),
            'Ž' => Some(0x8E),
            '‘' => Some(0x91),
            '’' => Some(0x92),
            '“' => Some(0x93),
            '”' => Some(0x94),
            '•' => Some(0x95),
            '–' => Some(0x96),
            '—' => Some(0x97),
            '˜' => Some(0x98),
            '™' => Some(0x99),
            'š' => Some(0x9A),
            '›' => Some(0x9B),
            'œ' => Some(0x9C),
            'ž' => Some(0x9E),
            'Ÿ' => Some(0x9F),
            _ => None,
        },
    }
}
