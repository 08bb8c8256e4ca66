// Template parser using recursive descent

use anyhow::{bail, Context, Result};

use super::ast::{Expression, OperatorCall, Template, TemplatePart, VariableSpec};

pub struct TemplateParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> TemplateParser<'a> {
    pub fn parse(template: &'a str) -> Result<Template> {
        let mut parser = Self {
            input: template,
            pos: 0,
        };
        parser.parse_template()
    }

    fn parse_template(&mut self) -> Result<Template> {
        let mut parts = Vec::new();
        let mut literal_buf = String::new();

        while self.pos < self.input.len() {
            match self.peek_char() {
                Some('{') => {
                    // Start of expression - flush literal buffer first
                    if !literal_buf.is_empty() {
                        parts.push(TemplatePart::Literal(std::mem::take(&mut literal_buf)));
                    }
                    let expr = self.parse_expression()?;
                    parts.push(TemplatePart::Expression(expr));
                }
                Some('}') => bail!("Unexpected closing brace at position {}", self.pos),
                _ => literal_buf.push(self.consume_char()?),
            }
        }

        if !literal_buf.is_empty() {
            parts.push(TemplatePart::Literal(literal_buf));
        }

        Ok(Template::new(parts))
    }

    fn parse_expression(&mut self) -> Result<Expression> {
        let start = self.pos;
        self.expect_char('{')?;

        let operator = if self.peek_char() == Some('-') {
            self.consume_char()?;
            Some(self.parse_operator_call()?)
        } else {
            None
        };

        let variables = self.parse_variable_list()?;
        self.expect_char('}')?;

        Ok(Expression {
            operator,
            variables,
            raw: self.input[start..self.pos].to_string(),
        })
    }

    /// Parses `op|arg|` after the leading `-`
    fn parse_operator_call(&mut self) -> Result<OperatorCall> {
        let name = self.parse_identifier()?;
        self.expect_char('|')?;

        let mut arg = String::new();
        loop {
            match self.peek_char() {
                Some('|') => {
                    self.consume_char()?;
                    break;
                }
                Some('{') | Some('}') | None => {
                    bail!("Unterminated argument for operator '{}' at position {}", name, self.pos)
                }
                Some(_) => arg.push(self.consume_char()?),
            }
        }

        Ok(OperatorCall { name, arg })
    }

    fn parse_variable_list(&mut self) -> Result<Vec<VariableSpec>> {
        let mut variables = vec![self.parse_variable()?];
        while self.peek_char() == Some(',') {
            self.consume_char()?;
            variables.push(self.parse_variable()?);
        }
        Ok(variables)
    }

    fn parse_variable(&mut self) -> Result<VariableSpec> {
        let mut name = String::new();

        while let Some(ch) = self.peek_char() {
            if ch.is_alphanumeric() || ch == '_' || ch == '.' {
                name.push(self.consume_char()?);
            } else if ch == '=' || ch == ',' || ch == '}' {
                break;
            } else {
                bail!(
                    "Invalid character '{}' in variable name at position {}",
                    ch,
                    self.pos
                );
            }
        }

        if name.is_empty() {
            bail!("Expected variable name at position {}", self.pos);
        }

        let var = VariableSpec::new(name);
        if self.peek_char() == Some('=') {
            self.consume_char()?;
            Ok(var.with_default(self.parse_default_value()?))
        } else {
            Ok(var)
        }
    }

    /// Defaults are percent-decoded, since expansion encodes them again
    fn parse_default_value(&mut self) -> Result<String> {
        let start = self.pos;
        let mut value = String::new();

        while let Some(ch) = self.peek_char() {
            match ch {
                ',' | '}' => break,
                '{' => bail!("Unexpected opening brace at position {}", self.pos),
                _ => value.push(self.consume_char()?),
            }
        }

        let decoded = urlencoding::decode(&value)
            .with_context(|| format!("Invalid percent-encoding in default value at position {}", start))?;
        Ok(decoded.into_owned())
    }

    fn parse_identifier(&mut self) -> Result<String> {
        let mut ident = String::new();

        while let Some(ch) = self.peek_char() {
            if ch.is_alphanumeric() || ch == '_' {
                ident.push(self.consume_char()?);
            } else {
                break;
            }
        }

        if ident.is_empty() {
            bail!("Expected identifier at position {}", self.pos);
        }

        Ok(ident)
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn consume_char(&mut self) -> Result<char> {
        let ch = self
            .peek_char()
            .ok_or_else(|| anyhow::anyhow!("Unexpected end of input at position {}", self.pos))?;
        self.pos += ch.len_utf8();
        Ok(ch)
    }

    fn expect_char(&mut self, expected: char) -> Result<()> {
        match self.peek_char() {
            Some(ch) if ch == expected => {
                self.consume_char()?;
                Ok(())
            }
            Some(ch) => bail!(
                "Expected '{}' but found '{}' at position {}",
                expected,
                ch,
                self.pos
            ),
            None => bail!("Expected '{}' but found end of input", expected),
        }
    }
}
