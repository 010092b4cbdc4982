//! Ad-hoc filter command and the interactive filter builder.

use anyhow::{anyhow, Context, Result};

use crate::cli::list::print_lead_table;
use crate::cli::ui::{select, text_input};
use crate::models::{FilterCondition, FilterGroup, FilterOperator, LeadField, LogicalOperator};
use crate::session::Session;

/// Build a group from `field:operator:value` expressions.
pub fn parse_filter(conditions: &[String], match_mode: Option<&str>) -> Result<FilterGroup> {
    let logical = match match_mode {
        Some(m) => LogicalOperator::parse(m)
            .ok_or_else(|| anyhow!("--match must be all or any, got '{}'", m))?,
        None => LogicalOperator::And,
    };

    let parsed = conditions
        .iter()
        .map(|c| {
            c.parse::<FilterCondition>()
                .with_context(|| format!("Bad condition '{}' (expected field:operator:value)", c))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(FilterGroup::new(logical, parsed))
}

/// Execute the filter command
pub fn run_filter(session: &mut Session, conditions: &[String], match_mode: Option<&str>) -> Result<()> {
    let group = parse_filter(conditions, match_mode)?;
    if !group.is_empty() {
        println!("where {}\n", group);
    }
    session.apply_filter(Some(group));

    let rows = session.table_rows();
    println!("{} matching\n", rows.len());
    print_lead_table(&rows, &session.query, None);
    Ok(())
}

/// Interactive builder seeded with `current`. Returns None when cancelled.
pub fn build_filter(current: Option<&FilterGroup>) -> Result<Option<FilterGroup>> {
    let mut conditions: Vec<FilterCondition> =
        current.map(|g| g.conditions.clone()).unwrap_or_default();
    let mut logical = current.map(|g| g.logical_operator).unwrap_or_default();

    loop {
        println!();
        if conditions.is_empty() {
            println!("  (no conditions: all leads)");
        }
        for condition in &conditions {
            println!("  {}", condition);
        }
        println!();

        let actions = [
            "Add condition",
            "Remove condition",
            match logical {
                LogicalOperator::And => "Match: all (switch to any)",
                LogicalOperator::Or => "Match: any (switch to all)",
            },
            "Apply",
        ];
        match select("filter", &actions)? {
            Some(0) => {
                if let Some(condition) = prompt_condition()? {
                    conditions.push(condition);
                }
            }
            Some(1) => {
                let labels: Vec<String> = conditions.iter().map(|c| c.to_string()).collect();
                if let Some(idx) = select("remove", &labels)? {
                    conditions.remove(idx);
                }
            }
            Some(2) => {
                logical = match logical {
                    LogicalOperator::And => LogicalOperator::Or,
                    LogicalOperator::Or => LogicalOperator::And,
                };
            }
            Some(_) => return Ok(Some(FilterGroup::new(logical, conditions))),
            None => return Ok(None),
        }
    }
}

fn prompt_condition() -> Result<Option<FilterCondition>> {
    let fields: Vec<&str> = LeadField::ALL.iter().map(|f| f.label()).collect();
    let Some(field_idx) = select("field", &fields)? else {
        return Ok(None);
    };
    let field = LeadField::ALL[field_idx];

    let operators: Vec<&str> = FilterOperator::ALL.iter().map(|o| o.label()).collect();
    let Some(op_idx) = select("operator", &operators)? else {
        return Ok(None);
    };
    let operator = FilterOperator::ALL[op_idx];

    let hint = if field.is_date() || operator.is_ordering() {
        "value (YYYY-MM-DD): "
    } else {
        "value: "
    };
    let Some(value) = text_input(hint, None)? else {
        return Ok(None);
    };

    Ok(Some(FilterCondition::new(field, operator, value.trim())))
}
