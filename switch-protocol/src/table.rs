use crate::error::EncodeError;
use crate::Frame;

const DEFAULT_COMMANDS: &[(&str, &str)] = &[
    ("RELAY_ON", "RELAY_ON"),
    ("RELAY_OFF", "RELAY_OFF"),
    ("RELAY_TOGGLE", "RELAY_TOGGLE"),
    ("GET_STATUS", "GET_STATUS"),
    ("RESTART", "RESTART"),
    // superseded by SET_TIME / GET_TIME, still accepted by older firmware
    ("TIME_SEND", "TIME_SEND"),
    ("TIME_RECV", "TIME_RECV"),
    ("SET_TIME_XX_XX_XX", "SET_TIME=03,07,00"),
    ("GET_TIME", "GET_TIME"),
    ("ADD_ALARM_XX_XX_XX_TASK", "ADD_ALARM=00,10,00,RELAY_ON"),
    ("GET_ALARMS", "GET_ALARMS"),
    ("ENABLE_ALARM_X_ENABLE/DISABLE", "ENABLE_ALARM=0,DISABLE"),
    ("DELETE_ALARM_X", "DELETE_ALARM=0"),
    ("CLEAR_ALARMS", "CLEAR_ALARMS"),
];

/// Named command payloads, kept in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTable {
    entries: Vec<(String, String)>,
}

impl CommandTable {
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Sets the payload for `name`. An existing entry keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, payload: impl Into<String>) {
        let name = name.into();
        let payload = payload.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = payload,
            None => self.entries.push((name, payload)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, payload)| payload.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, payload)| (name.as_str(), payload.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Builds the frame of every entry, stopping at the first payload that does not fit.
    pub fn encode_all(&self) -> Result<Vec<(&str, Frame)>, EncodeError> {
        self.iter()
            .map(|(name, payload)| Frame::new(payload).map(|frame| (name, frame)))
            .collect()
    }
}

impl Default for CommandTable {
    fn default() -> Self {
        DEFAULT_COMMANDS.iter().copied().collect()
    }
}

impl<N: Into<String>, P: Into<String>> FromIterator<(N, P)> for CommandTable {
    fn from_iter<T: IntoIterator<Item = (N, P)>>(iter: T) -> Self {
        let mut table = CommandTable::empty();
        table.extend(iter);
        table
    }
}

impl<N: Into<String>, P: Into<String>> Extend<(N, P)> for CommandTable {
    fn extend<T: IntoIterator<Item = (N, P)>>(&mut self, iter: T) {
        for (name, payload) in iter {
            self.insert(name, payload);
        }
    }
}
