//! Token-driven decoding.

use super::lex::{Container, Token};
use crate::{config::Config, errors::Error, vecmap::VecMap, Element};

/// Rebuilds an [`Element`] tree from a token source.
///
/// Any iterator of `Result<Token, Error>` will do; usually it is a
/// [`Lexer`](super::lex::Lexer), but hand-built token sequences work too.
///
/// # Example
///
/// ```
/// use lich::encoding::{de::Decoder, lex::*};
/// use lich::prelude::*;
///
/// let tokens = vec![
///     Token::Open(Container::Dict),
///     Token::Data(Bytes::from("k")),
///     Token::Data(Bytes::from("v")),
///     Token::Close(Container::Dict),
/// ];
///
/// let el = Decoder::new(tokens.into_iter().map(Ok), &Config::default())
///     .decode_element()
///     .unwrap();
///
/// assert_eq!(el, Element::dict(vec![(Bytes::from("k"), Element::from("v"))]));
/// ```
#[derive(Debug)]
pub struct Decoder<I> {
    tokens:    I,
    depth:     usize,
    max_depth: usize,
}

impl<I: Iterator<Item = Result<Token, Error>>> Decoder<I> {
    /// Creates a decoder over `tokens`.
    pub fn new(tokens: I, config: &Config) -> Self {
        Decoder {
            tokens,
            depth: 0,
            max_depth: config.max_depth,
        }
    }

    fn next_token(&mut self) -> Result<Option<Token>, Error> { self.tokens.next().transpose() }

    /// Decodes exactly one element and checks that no tokens follow it.
    pub fn decode_element(mut self) -> Result<Element, Error> {
        let el = self.element()?;
        match self.next_token()? {
            None => Ok(el),
            Some(_) => Err(Error::TrailingToken),
        }
    }

    fn element(&mut self) -> Result<Element, Error> {
        match self.next_token()? {
            Some(token) => self.element_from(token),
            None => Err(Error::MissingClose),
        }
    }

    fn element_from(&mut self, token: Token) -> Result<Element, Error> {
        match token {
            Token::Data(bs) => Ok(Element::Data(bs)),
            Token::Open(kind) => {
                if self.depth >= self.max_depth {
                    return Err(Error::TooDeep {
                        limit: self.max_depth,
                    });
                }
                self.depth += 1;
                let res = match kind {
                    Container::Array => self.array(),
                    Container::Dict => self.dict(),
                };
                self.depth -= 1;
                res
            }
            Token::Close(_) => Err(Error::UnexpectedClose),
        }
    }

    fn array(&mut self) -> Result<Element, Error> {
        let mut out = Vec::new();
        loop {
            match self.next_token()? {
                None => return Err(Error::MissingClose),
                Some(Token::Close(Container::Array)) => return Ok(Element::Array(out)),
                Some(Token::Close(Container::Dict)) => return Err(Error::UnexpectedClose),
                Some(token) => out.push(self.element_from(token)?),
            }
        }
    }

    fn dict(&mut self) -> Result<Element, Error> {
        let mut out = VecMap::new();
        loop {
            match self.next_token()? {
                None => return Err(Error::MissingClose),
                Some(Token::Close(Container::Dict)) => return Ok(Element::Dict(out)),
                Some(Token::Data(key)) => {
                    let value = self.element()?;
                    out.insert(key, value);
                }
                Some(_) => return Err(Error::BadKeyType),
            }
        }
    }
}
