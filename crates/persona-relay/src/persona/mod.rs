//! Built-in avatar personas.
//!
//! A persona is the fixed system prompt plus two curated reply lists:
//! - offline lines, served when no provider credential is configured
//! - failure lines, served by the chat endpoint when a provider call fails
//!
//! Both lists are non-empty for every built-in persona (checked at compile time), so picking a
//! line cannot fail.

mod hood_toly;
mod maduro;

use rand::Rng;

#[derive(Debug, Clone, Copy)]
pub struct Persona {
    name: &'static str,
    system_prompt: &'static str,
    offline_lines: &'static [&'static str],
    failure_lines: &'static [&'static str],
}

const BUILTIN: &[Persona] = &[hood_toly::PERSONA, maduro::PERSONA];

const _: () = {
    let mut i = 0;
    while i < BUILTIN.len() {
        assert!(!BUILTIN[i].offline_lines.is_empty() && !BUILTIN[i].failure_lines.is_empty());
        i += 1;
    }
};

impl Persona {
    /// Case-insensitive lookup among the built-in personas
    pub fn by_name(name: &str) -> Option<Persona> {
        let name = name.trim();
        BUILTIN
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .copied()
    }

    pub fn builtin() -> &'static [Persona] {
        BUILTIN
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn system_prompt(&self) -> &'static str {
        self.system_prompt
    }

    pub fn offline_lines(&self) -> &'static [&'static str] {
        self.offline_lines
    }

    pub fn failure_lines(&self) -> &'static [&'static str] {
        self.failure_lines
    }

    /// Uniformly random offline line
    pub fn offline_line(&self) -> &'static str {
        pick(self.offline_lines)
    }

    /// Uniformly random failure line
    pub fn failure_line(&self) -> &'static str {
        pick(self.failure_lines)
    }
}

fn pick(lines: &'static [&'static str]) -> &'static str {
    lines[rand::rng().random_range(0..lines.len())]
}

impl Default for Persona {
    fn default() -> Self {
        hood_toly::PERSONA
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(Persona::by_name("Hood-Toly").unwrap().name(), "hood-toly");
        assert_eq!(Persona::by_name(" maduro ").unwrap().name(), "maduro");
        assert!(Persona::by_name("satoshi").is_none());
    }

    #[test]
    fn test_builtin_lists_are_populated_and_disjoint() {
        for persona in Persona::builtin() {
            assert!(!persona.system_prompt().is_empty());
            assert!((5..=15).contains(&persona.offline_lines().len()), "{}", persona.name());
            assert!((5..=15).contains(&persona.failure_lines().len()), "{}", persona.name());
            for line in persona.failure_lines() {
                assert!(
                    !persona.offline_lines().contains(line),
                    "{}: {:?} is in both lists",
                    persona.name(),
                    line
                );
            }
        }
    }

    #[test]
    fn test_random_lines_come_from_their_list() {
        let persona = Persona::default();
        for _ in 0..50 {
            let line = persona.offline_line();
            assert!(persona.offline_lines().contains(&line));
            let line = persona.failure_line();
            assert!(persona.failure_lines().contains(&line));
        }
    }

    #[test]
    fn test_prompts_forbid_emojis() {
        for persona in Persona::builtin() {
            assert!(persona.system_prompt().contains("NO EMOJIS"), "{}", persona.name());
        }
    }
}
