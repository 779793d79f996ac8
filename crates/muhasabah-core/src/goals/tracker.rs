//! Goal-tracker transitions on [`HabitState`].
//!
//! Each transition clamps its input, pays a one-time reward the first time
//! an entity reaches completion, and reports what happened as events.
//! Dropping back below target keeps the reward: experience is monotonic.

use chrono::{DateTime, Utc};

use super::{
    clamp_progress, ExerciseId, NewCustomTask, SalahId, EXERCISE_REWARD, KNOWLEDGE_REWARD,
    REFLECTION_REWARD, SALAH_REWARD, STUDY_MINUTES_PER_EXP,
};
use crate::error::ValidationError;
use crate::events::{Event, GoalKind};
use crate::profile::{Reflection, Theme};
use crate::state::HabitState;

type Outcome = Result<Vec<Event>, ValidationError>;

fn positive(field: &str, value: i64) -> Result<u32, ValidationError> {
    if value <= 0 {
        return Err(ValidationError::NotPositive {
            field: field.to_string(),
            value,
        });
    }
    Ok(u32::try_from(value).unwrap_or(u32::MAX))
}

impl HabitState {
    pub fn update_exercise_progress(
        &mut self,
        id: ExerciseId,
        requested: i64,
        at: DateTime<Utc>,
    ) -> Outcome {
        let target = self.target(id);
        let newly_completed = {
            let exercise = self
                .goals
                .exercises
                .iter_mut()
                .find(|e| e.id == id)
                .ok_or_else(|| ValidationError::unknown("exercise", id.as_str()))?;
            exercise.current_progress = clamp_progress(requested, target);
            let crossed = exercise.is_completed(target) && !exercise.reward_claimed;
            if crossed {
                exercise.reward_claimed = true;
            }
            crossed
        };

        let mut events = Vec::new();
        if newly_completed {
            events.push(Event::GoalCompleted {
                kind: GoalKind::Exercise,
                id: id.as_str().to_string(),
                title: id.title().to_string(),
                exp: EXERCISE_REWARD,
                at,
            });
            self.award(EXERCISE_REWARD, at, &mut events);
        }
        Ok(events)
    }

    pub fn increment_exercise(&mut self, id: ExerciseId, delta: i64, at: DateTime<Utc>) -> Outcome {
        let current = self
            .goals
            .exercise(id)
            .map(|e| i64::from(e.current_progress))
            .ok_or_else(|| ValidationError::unknown("exercise", id.as_str()))?;
        self.update_exercise_progress(id, current.saturating_add(delta), at)
    }

    /// Flip a prayer. Only the unticked-to-ticked direction pays.
    pub fn toggle_salah(&mut self, id: SalahId, at: DateTime<Utc>) -> Outcome {
        let now_completed = {
            let salah = self
                .goals
                .salah
                .iter_mut()
                .find(|s| s.id == id)
                .ok_or_else(|| ValidationError::unknown("salah", id.as_str()))?;
            salah.completed = !salah.completed;
            salah.completed
        };

        let mut events = Vec::new();
        if now_completed {
            events.push(Event::GoalCompleted {
                kind: GoalKind::Salah,
                id: id.as_str().to_string(),
                title: id.name().to_string(),
                exp: SALAH_REWARD,
                at,
            });
            self.award(SALAH_REWARD, at, &mut events);
        }
        Ok(events)
    }

    pub fn update_knowledge(&mut self, id: &str, minutes: i64, at: DateTime<Utc>) -> Outcome {
        let completed = {
            let quest = self
                .goals
                .knowledge
                .iter_mut()
                .find(|k| k.id == id)
                .ok_or_else(|| ValidationError::unknown("knowledge quest", id))?;
            quest.current_minutes = clamp_progress(minutes, quest.target_minutes);
            if quest.is_completed() && !quest.reward_claimed {
                quest.reward_claimed = true;
                Some(quest.title.clone())
            } else {
                None
            }
        };

        let mut events = Vec::new();
        if let Some(title) = completed {
            events.push(Event::GoalCompleted {
                kind: GoalKind::Knowledge,
                id: id.to_string(),
                title,
                exp: KNOWLEDGE_REWARD,
                at,
            });
            self.award(KNOWLEDGE_REWARD, at, &mut events);
        }
        Ok(events)
    }

    /// Log a finished study session; one experience point per five minutes.
    pub fn add_study_minutes(&mut self, minutes: i64, at: DateTime<Utc>) -> Outcome {
        let minutes = positive("minutes", minutes)?;
        self.goals.study_minutes = self.goals.study_minutes.saturating_add(minutes);
        let exp = u64::from(minutes / STUDY_MINUTES_PER_EXP);

        let mut events = vec![Event::StudyLogged {
            minutes,
            total_minutes: self.goals.study_minutes,
            exp,
            at,
        }];
        if exp > 0 {
            self.award(exp, at, &mut events);
        }
        Ok(events)
    }

    pub fn add_custom_task(&mut self, task: NewCustomTask, id: String, at: DateTime<Utc>) -> Outcome {
        let task = task.build(id)?;
        let event = Event::CustomTaskAdded {
            id: task.id.clone(),
            title: task.title.clone(),
            at,
        };
        self.profile.custom_tasks.push(task);
        Ok(vec![event])
    }

    pub fn update_custom_task(&mut self, id: &str, requested: i64, at: DateTime<Utc>) -> Outcome {
        let completed = {
            let task = self
                .profile
                .custom_tasks
                .iter_mut()
                .find(|t| t.id == id)
                .ok_or_else(|| ValidationError::unknown("custom task", id))?;
            task.current = clamp_progress(requested, task.target);
            if task.is_completed() && !task.reward_claimed {
                task.reward_claimed = true;
                Some((task.title.clone(), task.exp_reward))
            } else {
                None
            }
        };

        let mut events = Vec::new();
        if let Some((title, exp)) = completed {
            events.push(Event::GoalCompleted {
                kind: GoalKind::CustomTask,
                id: id.to_string(),
                title,
                exp,
                at,
            });
            if exp > 0 {
                self.award(exp, at, &mut events);
            }
        }
        Ok(events)
    }

    pub fn increment_custom_task(&mut self, id: &str, delta: i64, at: DateTime<Utc>) -> Outcome {
        let current = self
            .profile
            .custom_task(id)
            .map(|t| i64::from(t.current))
            .ok_or_else(|| ValidationError::unknown("custom task", id))?;
        self.update_custom_task(id, current.saturating_add(delta), at)
    }

    pub fn remove_custom_task(&mut self, id: &str, at: DateTime<Utc>) -> Outcome {
        let before = self.profile.custom_tasks.len();
        self.profile.custom_tasks.retain(|t| t.id != id);
        if self.profile.custom_tasks.len() == before {
            return Err(ValidationError::unknown("custom task", id));
        }
        Ok(vec![Event::CustomTaskRemoved {
            id: id.to_string(),
            at,
        }])
    }

    /// Prepend a journal note; writing one is worth a little experience.
    pub fn add_reflection(
        &mut self,
        note: &str,
        category: &str,
        id: String,
        at: DateTime<Utc>,
    ) -> Outcome {
        let note = note.trim();
        if note.is_empty() {
            return Err(ValidationError::Empty {
                field: "note".into(),
            });
        }
        self.profile.reflections.insert(
            0,
            Reflection {
                id: id.clone(),
                date: at,
                note: note.to_string(),
                category: category.trim().to_string(),
            },
        );

        let mut events = vec![Event::ReflectionAdded { id, at }];
        self.award(REFLECTION_REWARD, at, &mut events);
        Ok(events)
    }

    pub fn set_theme(&mut self, theme: Theme, at: DateTime<Utc>) -> Outcome {
        self.profile.theme = theme;
        Ok(vec![Event::ThemeChanged { theme, at }])
    }

    pub fn toggle_sound(&mut self, at: DateTime<Utc>) -> Outcome {
        self.profile.sound_enabled = !self.profile.sound_enabled;
        Ok(vec![Event::SoundToggled {
            enabled: self.profile.sound_enabled,
            at,
        }])
    }
}
