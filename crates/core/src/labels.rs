#![forbid(unsafe_code)]

/// Strings the engine needs to show to a user.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelKey {
    OrphanObjectiveTitle,
    StepsCaption { count: usize },
    UntitledObjective,
    UntitledTask,
}

/// Resolves user-facing labels. Callers inject their own localisation; the engine keeps no
/// global translation state.
pub trait LabelResolver {
    fn resolve(&self, key: LabelKey) -> String;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultLabels;

impl LabelResolver for DefaultLabels {
    fn resolve(&self, key: LabelKey) -> String {
        match key {
            LabelKey::OrphanObjectiveTitle => "Unassigned tasks".to_string(),
            LabelKey::StepsCaption { count: 1 } => "1 step".to_string(),
            LabelKey::StepsCaption { count } => format!("{count} steps"),
            LabelKey::UntitledObjective => "Untitled objective".to_string(),
            LabelKey::UntitledTask => "Untitled task".to_string(),
        }
    }
}

impl<F> LabelResolver for F
where
    F: Fn(LabelKey) -> String,
{
    fn resolve(&self, key: LabelKey) -> String {
        self(key)
    }
}
