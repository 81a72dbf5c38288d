use std::collections::HashMap;

use crate::{
    function::{FunctionRegister, PathFunction},
    standard_functions::{Count, Keys, Length, Match, Search},
};

pub struct Environment {
    pub function_register: FunctionRegister,
}

impl Environment {
    /// An environment with the standard functions registered.
    pub fn new() -> Self {
        let mut function_register: FunctionRegister = HashMap::new();
        function_register.insert("count".to_string(), Box::new(Count::new()));
        function_register.insert("keys".to_string(), Box::new(Keys::new()));
        function_register.insert("length".to_string(), Box::new(Length::new()));
        function_register.insert("match".to_string(), Box::new(Match::new()));
        function_register.insert("search".to_string(), Box::new(Search::new()));

        Self { function_register }
    }

    /// An environment with no functions registered.
    pub fn empty() -> Self {
        Self {
            function_register: HashMap::new(),
        }
    }

    pub fn register(&mut self, name: &str, function: Box<dyn PathFunction + Sync>) {
        self.function_register.insert(name.to_string(), function);
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
