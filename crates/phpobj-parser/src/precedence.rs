use phpobj_lexer::TokenKind;

/// Binding power for Pratt parsing. Returns (left_bp, right_bp).
/// A higher binding power means tighter binding.
///
/// Operator precedence (from lowest to highest):
///  1. `or`                            (left)
///  2. `xor`                           (left)
///  3. `and`                           (left)
///  4. `= += -= ...` (assignment)      (right), handled separately
///  5. `??`                            (right)
///  6. `||`                            (left)
///  7. `&&`                            (left)
///  8. `|`                             (left)
///  9. `^`                             (left)
/// 10. `&`                             (left)
/// 11. `== != === !==`                 (nonassoc)
/// 12. `< <= > >= instanceof`          (nonassoc)
/// 13. `.`                             (left)
/// 14. `+ -`                           (left)
/// 15. `* / %`                         (left)
/// 16. `**`                            (right)
///
/// For left-associative ops, right_bp = left_bp + 1.
/// For right-associative ops, left_bp > right_bp.
pub fn infix_binding_power(kind: &TokenKind) -> Option<(u8, u8)> {
    match kind {
        TokenKind::Or => Some((1, 2)),
        TokenKind::Xor => Some((3, 4)),
        TokenKind::And => Some((5, 6)),

        TokenKind::QuestionQuestion => Some((14, 13)),

        TokenKind::PipePipe => Some((15, 16)),
        TokenKind::AmpersandAmpersand => Some((17, 18)),

        TokenKind::Pipe => Some((19, 20)),
        TokenKind::Caret => Some((21, 22)),
        TokenKind::Ampersand => Some((23, 24)),

        TokenKind::EqualsEquals
        | TokenKind::BangEquals
        | TokenKind::EqualsEqualsEquals
        | TokenKind::BangEqualsEquals => Some((25, 26)),

        TokenKind::LessThan
        | TokenKind::GreaterThan
        | TokenKind::LessThanEquals
        | TokenKind::GreaterThanEquals
        | TokenKind::Instanceof => Some((27, 28)),

        TokenKind::Dot => Some((31, 32)),

        TokenKind::Plus | TokenKind::Minus => Some((35, 36)),

        TokenKind::Star | TokenKind::Slash | TokenKind::Percent => Some((37, 38)),

        TokenKind::StarStar => Some((40, 39)),

        _ => None,
    }
}

/// Returns the prefix binding power for a token, or None if it's not a prefix operator.
pub fn prefix_binding_power(kind: &TokenKind) -> Option<u8> {
    match kind {
        TokenKind::Minus
        | TokenKind::Plus
        | TokenKind::Bang
        | TokenKind::Tilde
        | TokenKind::At
        | TokenKind::PlusPlus
        | TokenKind::MinusMinus => Some(41),
        _ => None,
    }
}

/// Returns the postfix binding power for a token, or None if it's not a postfix operator.
pub fn postfix_binding_power(kind: &TokenKind) -> Option<u8> {
    match kind {
        TokenKind::PlusPlus | TokenKind::MinusMinus => Some(43),
        _ => None,
    }
}

/// Assignment binding power, handled specially because it's right-associative
/// and binds looser than every binary operator except the keyword ones.
pub const ASSIGNMENT_BP: u8 = 8;

/// Member access (`->`, `::`) and calls bind tighter than any operator.
pub const MEMBER_BP: u8 = 44;
