use crate::EngineError;
use crate::token::Token;

/// Turn source text into the token sequence the engine consumes.
///
/// The eight command characters map one-to-one onto tokens. ASCII whitespace
/// is skipped; any other character is an error. The returned sequence always
/// ends with [`Token::EndOfProgram`], so execution is guaranteed to halt
/// when the instruction pointer runs off the written program.
pub fn tokenize(source: &str) -> Result<Vec<Token>, EngineError> {
    let mut tokens = Vec::with_capacity(source.len() + 1);
    for (pos, ch) in source.char_indices() {
        let token = match ch {
            '+' => Token::IncCell,
            '-' => Token::DecCell,
            '>' => Token::PtrRight,
            '<' => Token::PtrLeft,
            '.' => Token::Output,
            ',' => Token::Input,
            '[' => Token::BranchForward,
            ']' => Token::BranchBackward,
            _ if ch.is_ascii_whitespace() => continue,
            _ => return Err(EngineError::InvalidCharacter { ch, pos }),
        };
        tokens.push(token);
    }
    tokens.push(Token::EndOfProgram);
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_every_command_character() {
        let tokens = tokenize("+-><.,[]").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::IncCell,
                Token::DecCell,
                Token::PtrRight,
                Token::PtrLeft,
                Token::Output,
                Token::Input,
                Token::BranchForward,
                Token::BranchBackward,
                Token::EndOfProgram,
            ]
        );
    }

    #[test]
    fn whitespace_is_skipped() {
        let tokens = tokenize("+ +\n\t+").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::IncCell,
                Token::IncCell,
                Token::IncCell,
                Token::EndOfProgram,
            ]
        );
    }

    #[test]
    fn empty_source_yields_only_end_of_program() {
        assert_eq!(tokenize("").unwrap(), vec![Token::EndOfProgram]);
    }

    #[test]
    fn invalid_character_is_rejected_with_position() {
        let result = tokenize("+a+");
        assert!(matches!(
            result,
            Err(EngineError::InvalidCharacter { ch: 'a', pos: 1 })
        ));
    }
}
