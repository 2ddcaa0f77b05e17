// Record builder: runs the field prompts in a fixed order and assembles
// the payload for a create or an update.

use std::io;

use crate::model::{NewVehicle, VehicleUpdate};
use crate::ui::Console;
use crate::validate::{prompt_convertible, prompt_id, prompt_name, prompt_year};

/// Either payload the builder can produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Draft {
    Create(NewVehicle),
    Update(VehicleUpdate),
}

pub struct RecordBuilder<'a, C: Console + ?Sized> {
    console: &'a mut C,
}

impl<'a, C: Console + ?Sized> RecordBuilder<'a, C> {
    pub fn new(console: &'a mut C) -> Self {
        RecordBuilder { console }
    }

    /// `with_identity` selects the creation flow (id first, every field
    /// required) over the update flow (no id, convertible may be unset).
    pub fn build(&mut self, with_identity: bool) -> io::Result<Draft> {
        if with_identity {
            self.build_new().map(Draft::Create)
        } else {
            self.build_update().map(Draft::Update)
        }
    }

    /// Prompts id, brand, model, year, convertible. An empty id is kept
    /// as absent so the store can assign one.
    pub fn build_new(&mut self) -> io::Result<NewVehicle> {
        let id = prompt_id(&mut *self.console)?;
        let brand = prompt_name(&mut *self.console, "brand")?;
        let model = prompt_name(&mut *self.console, "model")?;
        let production_year = prompt_year(&mut *self.console)?;
        let convertible = prompt_convertible(&mut *self.console, false)?.unwrap_or_default();
        Ok(NewVehicle {
            id,
            brand,
            model,
            production_year,
            convertible,
        })
    }

    /// Brand, model and year are always re-collected; only convertible
    /// can be left unset.
    pub fn build_update(&mut self) -> io::Result<VehicleUpdate> {
        let brand = prompt_name(&mut *self.console, "brand")?;
        let model = prompt_name(&mut *self.console, "model")?;
        let production_year = prompt_year(&mut *self.console)?;
        let convertible = prompt_convertible(&mut *self.console, true)?;
        Ok(VehicleUpdate {
            brand,
            model,
            production_year,
            convertible,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::scripted::ScriptedConsole;

    #[test]
    fn creation_flow_asks_for_id_first() {
        let mut console = ScriptedConsole::new(["", "Ford", "Model T", "1927", "n"]);
        let draft = RecordBuilder::new(&mut console).build(true).unwrap();

        assert_eq!(
            draft,
            Draft::Create(NewVehicle {
                id: None,
                brand: "Ford".into(),
                model: "Model T".into(),
                production_year: 1927,
                convertible: false,
            })
        );
        assert!(console.prompts[0].contains("car ID"));
        assert!(console.prompts[1].contains("brand"));
        assert!(console.prompts[2].contains("model"));
        assert!(console.prompts[3].contains("year"));
        assert!(console.prompts[4].contains("convertible"));
    }

    #[test]
    fn creation_flow_reprompts_bad_fields_in_place() {
        let mut console = ScriptedConsole::new([
            "x1", "12", "Rolls-Royce", "Rolls Royce", "Phantom", "1899", "1925", "", "Y",
        ]);
        let created = RecordBuilder::new(&mut console).build_new().unwrap();

        assert_eq!(created.id.as_deref(), Some("12"));
        assert_eq!(created.brand, "Rolls Royce");
        assert_eq!(created.production_year, 1925);
        assert!(created.convertible);
        assert_eq!(console.remaining(), 0);
    }

    #[test]
    fn update_flow_skips_id_and_allows_unset_convertible() {
        let mut console = ScriptedConsole::new(["Jaguar", "E Type", "1961", ""]);
        let draft = RecordBuilder::new(&mut console).build(false).unwrap();

        assert_eq!(
            draft,
            Draft::Update(VehicleUpdate {
                brand: "Jaguar".into(),
                model: "E Type".into(),
                production_year: 1961,
                convertible: None,
            })
        );
        assert!(console.prompts.iter().all(|p| !p.contains("car ID")));
    }
}
