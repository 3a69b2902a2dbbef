use super::*;
use crate::domain::{Budget, OperationUsageWire, PartWire, RecordId, ToolWire};

fn shape(draft: &BudgetDraft) -> Vec<Vec<usize>> {
    draft
        .tools
        .iter()
        .map(|t| t.parts.iter().map(|p| p.operations.len()).collect())
        .collect()
}

#[test]
fn test_add_tool_appends_empty_tool() {
    let draft = BudgetDraft::new().add_tool();
    assert_eq!(draft.tools.len(), 1);
    assert_eq!(draft.tools[0].name, "");
    assert_eq!(draft.tools[0].quantity.raw(), "0");
    assert!(draft.tools[0].parts.is_empty());
}

#[test]
fn test_add_operation_usage_touches_only_target_part() {
    let draft = BudgetDraft::new()
        .add_tool()
        .add_tool()
        .add_part(0)
        .add_part(1)
        .add_part(1)
        .add_operation_usage(1, 1);
    assert_eq!(shape(&draft), vec![vec![0], vec![0, 1]]);
    let usage = draft.operation_usage(1, 1, 0).unwrap();
    assert!(usage.operation_ref.is_empty());
    assert_eq!(usage.hours.raw(), "0");
}

#[test]
fn test_remove_tool_keeps_order_of_others() {
    let draft = BudgetDraft::new()
        .add_tool()
        .add_tool()
        .add_tool()
        .set_field(FieldPath::tool(0, ToolField::Name), "A")
        .set_field(FieldPath::tool(1, ToolField::Name), "B")
        .set_field(FieldPath::tool(2, ToolField::Name), "C")
        .remove_tool(1);
    let names: Vec<_> = draft.tools.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["A", "C"]);
}

#[test]
fn test_remove_part_and_usage() {
    let draft = BudgetDraft::new()
        .add_tool()
        .add_part(0)
        .add_part(0)
        .add_operation_usage(0, 0)
        .add_operation_usage(0, 0)
        .remove_operation_usage(0, 0, 0)
        .remove_part(0, 1);
    assert_eq!(shape(&draft), vec![vec![1]]);
}

#[test]
fn test_out_of_range_edits_are_noops() {
    assert_eq!(BudgetDraft::new().remove_tool(0), BudgetDraft::new());
    let base = BudgetDraft::new().add_tool().add_part(0);
    assert_eq!(base.clone().remove_tool(3), base);
    assert_eq!(base.clone().remove_part(0, 5), base);
    assert_eq!(base.clone().remove_part(4, 0), base);
    assert_eq!(base.clone().add_part(2), base);
    assert_eq!(base.clone().add_operation_usage(0, 9), base);
    assert_eq!(base.clone().remove_operation_usage(0, 0, 0), base);
    assert_eq!(
        base.clone().set_field(FieldPath::part(1, 0, PartField::Name), "x"),
        base
    );
}

#[test]
fn test_set_field_writes_exactly_one_leaf() {
    let base = BudgetDraft::new()
        .add_tool()
        .add_part(0)
        .add_part(0)
        .add_operation_usage(0, 1);
    let edited = base
        .clone()
        .set_field(FieldPath::part(0, 1, PartField::Weight), "12.5");
    assert_eq!(edited.part(0, 1).unwrap().weight.raw(), "12.5");
    assert_eq!(edited.part(0, 1).unwrap().weight.as_decimal(), Some(12.5));
    assert_eq!(edited.part(0, 0), base.part(0, 0));
    assert_eq!(edited.part(0, 1).unwrap().operations, base.part(0, 1).unwrap().operations);
    assert_eq!(edited.name, base.name);
}

#[test]
fn test_set_field_keeps_unparsable_text() {
    let draft = BudgetDraft::new()
        .add_tool()
        .add_part(0)
        .set_field(FieldPath::part(0, 0, PartField::Weight), "abc");
    assert_eq!(draft.get_field(FieldPath::part(0, 0, PartField::Weight)).as_deref(), Some("abc"));
    assert_eq!(draft.part(0, 0).unwrap().weight.as_decimal(), None);

    let errors = draft.serialize().unwrap_err();
    assert_eq!(errors.get("ferramentas[0].pecas[0].peso"), Some("Informe um número válido"));
}

#[test]
fn test_field_path_keys() {
    assert_eq!(FieldPath::Budget(BudgetField::Client).key(), "cliente_id");
    assert_eq!(FieldPath::tool(2, ToolField::Quantity).key(), "ferramentas[2].quantidade");
    assert_eq!(
        FieldPath::operation(0, 1, 3, OperationField::Hours).key(),
        "ferramentas[0].pecas[1].operacoes[3].horas"
    );
}

#[test]
fn test_furadeira_scenario_serializes_nested_and_flat() {
    let draft = BudgetDraft::new()
        .add_tool()
        .set_field(FieldPath::tool(0, ToolField::Name), "Furadeira")
        .set_field(FieldPath::tool(0, ToolField::Quantity), "1")
        .add_part(0)
        .set_field(FieldPath::part(0, 0, PartField::Name), "Eixo")
        .add_operation_usage(0, 0)
        .set_field(FieldPath::operation(0, 0, 0, OperationField::Hours), "5");

    let payload = draft.serialize().unwrap();
    assert_eq!(payload.nome, "");
    assert_eq!(payload.ferramentas.len(), 1);
    let tool = &payload.ferramentas[0];
    assert_eq!(tool.name, "Furadeira");
    assert_eq!(tool.quantity, 1);
    assert_eq!(tool.parts[0].name, "Eixo");
    assert_eq!(tool.parts[0].quantity, 0);
    assert_eq!(tool.parts[0].weight, 0.0);
    assert_eq!(tool.parts[0].operations, vec![OperationUsageWire { operacao_id: RecordId::default(), hours: 5.0 }]);

    assert_eq!(payload.pecas.len(), 1);
    assert_eq!(payload.pecas[0].name, "Eixo");
    assert_eq!(payload.pecas[0].ferramenta_nome, "Furadeira");
    assert_eq!(payload.operacoes, vec![OperationUsageWire { operacao_id: RecordId::default(), hours: 5.0 }]);

    let json = serde_json::to_value(&payload).unwrap();
    assert_eq!(json["ferramentas"][0]["pecas"][0]["operacoes"][0]["horas"], 5.0);
    assert_eq!(json["pecas"][0]["ferramenta_nome"], "Furadeira");
    assert_eq!(json["operacoes"][0]["operacao_id"], "");
}

#[test]
fn test_validate_reports_required_and_numeric() {
    let draft = BudgetDraft::new()
        .add_tool()
        .add_part(0)
        .set_field(FieldPath::part(0, 0, PartField::Quantity), "2,5")
        .add_operation_usage(0, 0);
    let errors = draft.validate();
    assert_eq!(errors.get("nome"), Some(crate::validation::REQUIRED));
    assert_eq!(errors.get("cliente_id"), Some(crate::validation::REQUIRED));
    assert_eq!(errors.get("ferramentas[0].nome"), Some(crate::validation::REQUIRED));
    assert_eq!(errors.get("ferramentas[0].pecas[0].material_id"), Some(crate::validation::REQUIRED));
    assert_eq!(
        errors.get("ferramentas[0].pecas[0].operacoes[0].operacao_id"),
        Some(crate::validation::REQUIRED)
    );
    assert_eq!(errors.get("ferramentas[0].pecas[0].quantidade"), Some("Informe um número inteiro"));
}

#[test]
fn test_complete_draft_validates_clean() {
    let draft = BudgetDraft::new()
        .set_field(FieldPath::Budget(BudgetField::Name), "Molde 12")
        .set_field(FieldPath::Budget(BudgetField::Client), "7")
        .set_field(FieldPath::Budget(BudgetField::Contact), "Ana")
        .add_tool()
        .set_field(FieldPath::tool(0, ToolField::Name), "Prensa")
        .add_part(0)
        .set_field(FieldPath::part(0, 0, PartField::Name), "Base")
        .set_field(FieldPath::part(0, 0, PartField::Material), "3")
        .set_field(FieldPath::part(0, 0, PartField::Weight), "1,75")
        .add_operation_usage(0, 0)
        .set_field(FieldPath::operation(0, 0, 0, OperationField::Operation), "9");
    assert!(draft.validate().is_empty());
    assert_eq!(draft.serialize().unwrap().ferramentas[0].parts[0].weight, 1.75);
}

fn nested_budget() -> Budget {
    Budget {
        id: "11".into(),
        name: "Molde".into(),
        cliente_id: "4".into(),
        contact: "Ana".into(),
        tools: vec![
            ToolWire {
                name: "Furadeira".into(),
                quantity: 2,
                parts: vec![PartWire {
                    name: "Eixo".into(),
                    quantity: 3,
                    note: "temperar".into(),
                    material_id: "8".into(),
                    weight: 0.1,
                    operations: vec![
                        OperationUsageWire { operacao_id: "1".into(), hours: 1.25 },
                        OperationUsageWire { operacao_id: "2".into(), hours: 0.3 },
                    ],
                }],
            },
            ToolWire { name: "Prensa".into(), quantity: 1, parts: vec![] },
        ],
        ..Default::default()
    }
}

#[test]
fn test_to_editable_then_serialize_preserves_tree() {
    let budget = nested_budget();
    let draft = BudgetDraft::from_record(&budget);
    assert_eq!(draft.client_ref.as_str(), "4");
    let payload = draft.serialize().unwrap();
    assert_eq!(payload.ferramentas, budget.tools);
    assert_eq!(payload.nome, "Molde");
    assert_eq!(payload.contato, "Ana");
}

#[test]
fn test_editing_draft_leaves_record_untouched() {
    let budget = nested_budget();
    let draft = BudgetDraft::from(&budget)
        .set_field(FieldPath::tool(0, ToolField::Name), "Outra")
        .remove_part(0, 0);
    assert_eq!(draft.tools[0].name, "Outra");
    assert_eq!(budget, nested_budget());
}

#[test]
fn test_to_editable_regroups_flat_record() {
    let json = r#"{
        "id": 3,
        "nome": "Antigo",
        "cliente_id": 1,
        "contato": "Beto",
        "ferramentas": [],
        "pecas": [
            {"nome":"Eixo","quantidade":1,"nota":"","material_id":2,"peso":1.5,"ferramenta_nome":"Furadeira"},
            {"nome":"Base","quantidade":2,"nota":"","material_id":3,"peso":4,"ferramenta_nome":"Prensa"},
            {"nome":"Bucha","quantidade":4,"nota":"","material_id":2,"peso":0.2,"ferramenta_nome":"Furadeira"}
        ],
        "operacoes": [{"operacao_id":5,"horas":2}]
    }"#;
    let budget: Budget = serde_json::from_str(json).unwrap();
    let draft = BudgetDraft::from_record(&budget);
    let tools: Vec<_> = draft.tools.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(tools, ["Furadeira", "Prensa"]);
    let parts: Vec<_> = draft.tools[0].parts.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(parts, ["Eixo", "Bucha"]);
    assert_eq!(draft.tools[0].parts[0].weight.as_decimal(), Some(1.5));
    assert!(draft.tools.iter().flat_map(|t| &t.parts).all(|p| p.operations.is_empty()));
}

#[test]
fn test_shape_follows_random_edit_sequence() {
    // Mirror every edit on a plain shape model and compare after each step.
    let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
    let mut next = move |bound: usize| {
        seed ^= seed << 13;
        seed ^= seed >> 7;
        seed ^= seed << 17;
        (seed % bound as u64) as usize
    };

    let mut draft = BudgetDraft::new();
    let mut model: Vec<Vec<usize>> = Vec::new();
    for _ in 0..500 {
        let t = next(4);
        let p = next(4);
        let o = next(4);
        match next(6) {
            0 => {
                draft = draft.add_tool();
                model.push(Vec::new());
            }
            1 => {
                draft = draft.remove_tool(t);
                if t < model.len() {
                    model.remove(t);
                }
            }
            2 => {
                draft = draft.add_part(t);
                if let Some(tool) = model.get_mut(t) {
                    tool.push(0);
                }
            }
            3 => {
                draft = draft.remove_part(t, p);
                if let Some(tool) = model.get_mut(t) {
                    if p < tool.len() {
                        tool.remove(p);
                    }
                }
            }
            4 => {
                draft = draft.add_operation_usage(t, p);
                if let Some(n) = model.get_mut(t).and_then(|tool| tool.get_mut(p)) {
                    *n += 1;
                }
            }
            _ => {
                draft = draft.remove_operation_usage(t, p, o);
                if let Some(n) = model.get_mut(t).and_then(|tool| tool.get_mut(p)) {
                    if o < *n {
                        *n -= 1;
                    }
                }
            }
        }
        assert_eq!(shape(&draft), model);
    }
}

#[test]
fn test_total_hours_skips_unparsable() {
    let draft = BudgetDraft::new()
        .add_tool()
        .add_part(0)
        .add_operation_usage(0, 0)
        .add_operation_usage(0, 0)
        .set_field(FieldPath::operation(0, 0, 0, OperationField::Hours), "2,5")
        .set_field(FieldPath::operation(0, 0, 1, OperationField::Hours), "x");
    assert_eq!(draft.total_hours(), 2.5);
}

#[test]
fn test_out_of_range_stored_numbers_load_as_zero() {
    let json = r#"{
        "id": 8,
        "nome": "Legado",
        "cliente_id": 1,
        "contato": "Caio",
        "ferramentas": [{
            "nome": "Prensa",
            "quantidade": 1,
            "pecas": [
                {"nome":"A","quantidade":1,"material_id":2,"peso":-1,"operacoes":[{"operacao_id":5,"horas":-2}]},
                {"nome":"B","quantidade":1,"material_id":2,"peso":"NaN","operacoes":[{"operacao_id":5,"horas":"inf"}]},
                {"nome":"C","quantidade":1,"material_id":2,"peso":"inf","operacoes":[{"operacao_id":5,"horas":"3,5"}]}
            ]
        }]
    }"#;
    let budget: Budget = serde_json::from_str(json).unwrap();
    let draft = BudgetDraft::from_record(&budget);
    let weights: Vec<_> = draft.tools[0].parts.iter().map(|p| p.weight.as_decimal()).collect();
    assert_eq!(weights, [Some(0.0), Some(0.0), Some(0.0)]);
    assert_eq!(draft.total_hours(), 3.5);
    assert!(draft.validate().is_empty());

    let payload = draft.serialize().unwrap();
    assert!(payload.pecas.iter().all(|p| p.weight == 0.0));
    let hours: Vec<_> = payload.operacoes.iter().map(|o| o.hours).collect();
    assert_eq!(hours, [0.0, 0.0, 3.5]);
}

#[test]
fn test_flat_record_with_negative_weight_loads_as_zero() {
    let json = r#"{
        "id": 9,
        "nome": "Antigo",
        "cliente_id": 1,
        "contato": "Beto",
        "pecas": [{"nome":"Eixo","quantidade":1,"material_id":2,"peso":-4.5,"ferramenta_nome":"Furadeira"}]
    }"#;
    let budget: Budget = serde_json::from_str(json).unwrap();
    let draft = BudgetDraft::from_record(&budget);
    assert_eq!(draft.tools[0].parts[0].weight.raw(), "0");
    assert!(draft.serialize().is_ok());
}
