//! # Bill Summary
//!
//! Derives who owes what from a set of assigned items, and turns it into
//! a settlement plan when a payer is designated.
//!
//! ## Calculation Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    BillSplitSummary::calculate                          │
//! │                                                                         │
//! │  participants + assigned items + service charge + payer                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  service shares = service.split_evenly(participants.len())             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  per participant:                                                       │
//! │    Individual item  → full cost, item listed as-is                     │
//! │    EqualSplit item  → pence share by position, listed as               │
//! │                       "Garlic Bread (split 3 ways)"                    │
//! │    + their service share                                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ParticipantBalance per person, plus the whole-bill aggregates         │
//! │  (total_assigned, total_unassigned, is_fully_assigned)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Exactness
//! All shares come from [`Money::split_evenly`], so the sum of balance
//! totals always equals `total_assigned + service_charge` to the penny,
//! and `is_fully_assigned` is a plain integer equality.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::receipt::ReceiptItem;
use crate::split::{AssignedReceiptItem, ItemAssignment, Participant};

// =============================================================================
// Participant Balance
// =============================================================================

/// One participant's slice of the bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ParticipantBalance {
    pub participant: Participant,

    /// The lines this participant owes. Shared lines appear with their
    /// share cost and a "(split N ways)" label so an itemized view reads
    /// correctly without re-deriving anything.
    pub items_owed: Vec<ReceiptItem>,

    /// Sum of `items_owed` costs.
    pub subtotal: Money,

    /// This participant's share of the service charge.
    pub service_charge: Money,

    /// `subtotal + service_charge`.
    pub total: Money,
}

// =============================================================================
// Bill Split Summary
// =============================================================================

/// The complete derived view of a bill split. Recomputed from scratch on
/// every change, never incrementally patched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BillSplitSummary {
    pub participants: Vec<Participant>,
    pub assigned_items: Vec<AssignedReceiptItem>,
    pub balances: Vec<ParticipantBalance>,

    /// Sum of costs of assigned lines (service charge not included).
    pub total_assigned: Money,

    /// Sum of costs of unassigned lines.
    pub total_unassigned: Money,

    /// True when every line is assigned. Exact: no tolerance involved.
    pub is_fully_assigned: bool,

    /// The participant who paid the whole bill, if designated.
    pub payer_id: Option<String>,
}

impl BillSplitSummary {
    /// Computes balances and aggregates for the given state.
    ///
    /// Total by construction: zero participants yields empty balances,
    /// assignments naming unknown participants contribute to nobody.
    pub fn calculate(
        participants: &[Participant],
        assigned_items: &[AssignedReceiptItem],
        service_charge: Money,
        payer_id: Option<String>,
    ) -> Self {
        let service_shares = service_charge.split_evenly(participants.len());

        let balances = participants
            .iter()
            .enumerate()
            .map(|(idx, participant)| {
                let mut items_owed = Vec::new();
                let mut subtotal = Money::zero();

                for assigned in assigned_items {
                    match &assigned.assignment {
                        ItemAssignment::Individual { participant_id }
                            if *participant_id == participant.id =>
                        {
                            subtotal += assigned.item.cost;
                            items_owed.push(assigned.item.clone());
                        }
                        ItemAssignment::EqualSplit { participant_ids } => {
                            let position = participant_ids
                                .iter()
                                .position(|id| *id == participant.id);
                            if let Some(position) = position {
                                let shares =
                                    assigned.item.cost.split_evenly(participant_ids.len());
                                let share = shares[position];
                                subtotal += share;
                                items_owed.push(ReceiptItem {
                                    id: assigned.item.id.clone(),
                                    name: format!(
                                        "{} (split {} ways)",
                                        assigned.item.name,
                                        participant_ids.len()
                                    ),
                                    quantity: assigned.item.quantity,
                                    cost: share,
                                });
                            }
                        }
                        _ => {}
                    }
                }

                let service_share = service_shares[idx];
                ParticipantBalance {
                    participant: participant.clone(),
                    items_owed,
                    subtotal,
                    service_charge: service_share,
                    total: subtotal + service_share,
                }
            })
            .collect();

        let total_assigned: Money = assigned_items
            .iter()
            .filter(|a| a.is_assigned())
            .map(|a| a.item.cost)
            .sum();
        let total_unassigned: Money = assigned_items
            .iter()
            .filter(|a| !a.is_assigned())
            .map(|a| a.item.cost)
            .sum();

        BillSplitSummary {
            participants: participants.to_vec(),
            assigned_items: assigned_items.to_vec(),
            balances,
            total_assigned,
            total_unassigned,
            is_fully_assigned: total_unassigned.is_zero(),
            payer_id,
        }
    }

    /// Looks up a participant's balance by id.
    pub fn balance_for(&self, participant_id: &str) -> Option<&ParticipantBalance> {
        self.balances
            .iter()
            .find(|b| b.participant.id == participant_id)
    }

    /// Builds the settlement plan: who pays the designated payer, and how
    /// much.
    ///
    /// Returns `None` when no payer is designated or the designated id no
    /// longer matches a participant. Participants owing nothing are left
    /// out of the payment list.
    pub fn payment_summary(&self) -> Option<PaymentSummary> {
        let payer_id = self.payer_id.as_deref()?;
        let payer = self
            .participants
            .iter()
            .find(|p| p.id == payer_id)?
            .clone();

        let total_bill_amount: Money = self.balances.iter().map(|b| b.total).sum();
        let payer_owes = self
            .balance_for(payer_id)
            .map(|b| b.total)
            .unwrap_or_default();

        let payments = self
            .balances
            .iter()
            .filter(|b| b.participant.id != payer_id && b.total.is_positive())
            .map(|b| Payment {
                from: b.participant.clone(),
                to: payer.clone(),
                amount: b.total,
            })
            .collect();

        Some(PaymentSummary {
            payer,
            total_bill_amount,
            payer_owes,
            payments,
        })
    }
}

// =============================================================================
// Settlement
// =============================================================================

/// A single reimbursement from one participant to the payer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Payment {
    pub from: Participant,
    pub to: Participant,
    pub amount: Money,
}

/// The settlement plan once a payer is designated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PaymentSummary {
    /// Who settled the bill with the venue.
    pub payer: Participant,
    pub total_bill_amount: Money,

    /// The payer's own share (already covered by paying the bill).
    pub payer_owes: Money,

    /// Reimbursements owed to the payer, in participant order.
    pub payments: Vec<Payment>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn participants(names: &[&str]) -> Vec<Participant> {
        names.iter().map(|n| Participant::new(n).unwrap()).collect()
    }

    fn assigned(item: ReceiptItem, assignment: ItemAssignment) -> AssignedReceiptItem {
        AssignedReceiptItem { item, assignment }
    }

    #[test]
    fn individual_assignments_with_service() {
        // A: Pizza 20.00 + Drinks 9.00 = 29.00; B: Salad 8.00.
        // Service 3.70 split two ways: 1.85 each.
        let people = participants(&["A", "B"]);
        let items = vec![
            assigned(
                ReceiptItem::new("Pizza", 2, Money::from_pence(2000)),
                ItemAssignment::individual(&people[0].id),
            ),
            assigned(
                ReceiptItem::new("Drinks", 3, Money::from_pence(900)),
                ItemAssignment::individual(&people[0].id),
            ),
            assigned(
                ReceiptItem::new("Salad", 1, Money::from_pence(800)),
                ItemAssignment::individual(&people[1].id),
            ),
        ];

        let summary =
            BillSplitSummary::calculate(&people, &items, Money::from_pence(370), None);

        let a = summary.balance_for(&people[0].id).unwrap();
        assert_eq!(a.subtotal, Money::from_pence(2900));
        assert_eq!(a.service_charge, Money::from_pence(185));
        assert_eq!(a.total, Money::from_pence(3085));
        assert_eq!(a.items_owed.len(), 2);

        let b = summary.balance_for(&people[1].id).unwrap();
        assert_eq!(b.subtotal, Money::from_pence(800));
        assert_eq!(b.total, Money::from_pence(985));

        assert_eq!(summary.total_assigned, Money::from_pence(3700));
        assert_eq!(summary.total_unassigned, Money::zero());
        assert!(summary.is_fully_assigned);
    }

    #[test]
    fn equal_split_three_ways() {
        // £20.00 three ways: 667 / 667 / 666. Service £3.70 three ways:
        // 124 / 123 / 123.
        let people = participants(&["A", "B", "C"]);
        let ids: Vec<String> = people.iter().map(|p| p.id.clone()).collect();
        let items = vec![
            assigned(
                ReceiptItem::new("Sharing Platter", 1, Money::from_pence(2000)),
                ItemAssignment::equal_split(ids),
            ),
            AssignedReceiptItem::unassigned(ReceiptItem::new("Salad", 1, Money::from_pence(800))),
            AssignedReceiptItem::unassigned(ReceiptItem::new("Drinks", 3, Money::from_pence(900))),
        ];

        let summary =
            BillSplitSummary::calculate(&people, &items, Money::from_pence(370), None);

        let subtotals: Vec<i64> = summary.balances.iter().map(|b| b.subtotal.pence()).collect();
        assert_eq!(subtotals, vec![667, 667, 666]);

        let service: Vec<i64> = summary
            .balances
            .iter()
            .map(|b| b.service_charge.pence())
            .collect();
        assert_eq!(service, vec![124, 123, 123]);

        // The relabeled share line reads correctly.
        let a = &summary.balances[0];
        assert_eq!(a.items_owed.len(), 1);
        assert!(a.items_owed[0].name.contains("split 3 ways"));
        assert_eq!(a.items_owed[0].cost, Money::from_pence(667));

        // Nothing lost to rounding; unassigned lines contribute to nobody.
        let balance_total: Money = summary.balances.iter().map(|b| b.total).sum();
        assert_eq!(balance_total, Money::from_pence(2370));
        assert_eq!(summary.total_unassigned, Money::from_pence(1700));
        assert!(!summary.is_fully_assigned);
    }

    #[test]
    fn duplicate_split_members_do_not_lose_money() {
        // £30.00 nominally split between Alice (listed twice) and Bob must
        // still land as a two-way split: 15.00 each, nothing dropped.
        let people = participants(&["Alice", "Bob"]);
        let items = vec![assigned(
            ReceiptItem::new("Platter", 1, Money::from_pence(3000)),
            ItemAssignment::equal_split(vec![
                people[0].id.clone(),
                people[0].id.clone(),
                people[1].id.clone(),
            ]),
        )];

        let summary = BillSplitSummary::calculate(&people, &items, Money::zero(), None);

        assert_eq!(
            summary.balance_for(&people[0].id).unwrap().subtotal,
            Money::from_pence(1500)
        );
        assert_eq!(
            summary.balance_for(&people[1].id).unwrap().subtotal,
            Money::from_pence(1500)
        );

        let balance_total: Money = summary.balances.iter().map(|b| b.total).sum();
        assert_eq!(balance_total, summary.total_assigned);
        assert!(summary.balances[0].items_owed[0].name.contains("split 2 ways"));
    }

    #[test]
    fn split_share_by_position_not_by_participant_order() {
        let people = participants(&["A", "B"]);
        // B listed first in the split, so B absorbs the extra penny.
        let items = vec![assigned(
            ReceiptItem::new("Dessert", 1, Money::from_pence(501)),
            ItemAssignment::equal_split(vec![people[1].id.clone(), people[0].id.clone()]),
        )];

        let summary = BillSplitSummary::calculate(&people, &items, Money::zero(), None);

        assert_eq!(
            summary.balance_for(&people[1].id).unwrap().subtotal,
            Money::from_pence(251)
        );
        assert_eq!(
            summary.balance_for(&people[0].id).unwrap().subtotal,
            Money::from_pence(250)
        );
    }

    #[test]
    fn unassigned_items_tracked() {
        let people = participants(&["A"]);
        let items = vec![
            assigned(
                ReceiptItem::new("Pizza", 1, Money::from_pence(1500)),
                ItemAssignment::individual(&people[0].id),
            ),
            AssignedReceiptItem::unassigned(ReceiptItem::new(
                "Mystery",
                1,
                Money::from_pence(400),
            )),
        ];

        let summary = BillSplitSummary::calculate(&people, &items, Money::zero(), None);

        assert_eq!(summary.total_assigned, Money::from_pence(1500));
        assert_eq!(summary.total_unassigned, Money::from_pence(400));
        assert!(!summary.is_fully_assigned);
    }

    #[test]
    fn zero_participants() {
        let items = vec![AssignedReceiptItem::unassigned(ReceiptItem::new(
            "Pizza",
            1,
            Money::from_pence(1500),
        ))];

        let summary = BillSplitSummary::calculate(&[], &items, Money::from_pence(200), None);

        assert!(summary.balances.is_empty());
        assert_eq!(summary.total_unassigned, Money::from_pence(1500));
        assert!(!summary.is_fully_assigned);
    }

    #[test]
    fn empty_bill_is_fully_assigned() {
        let people = participants(&["A"]);
        let summary = BillSplitSummary::calculate(&people, &[], Money::zero(), None);
        assert!(summary.is_fully_assigned);
        assert_eq!(summary.balances[0].total, Money::zero());
    }

    #[test]
    fn assignment_to_unknown_participant_counts_nobody() {
        let people = participants(&["A"]);
        let items = vec![assigned(
            ReceiptItem::new("Pizza", 1, Money::from_pence(1500)),
            ItemAssignment::individual("ghost"),
        )];

        let summary = BillSplitSummary::calculate(&people, &items, Money::zero(), None);

        // The line is assigned as far as the aggregates are concerned,
        // but no balance picks it up.
        assert_eq!(summary.total_assigned, Money::from_pence(1500));
        assert_eq!(summary.balances[0].subtotal, Money::zero());
    }

    #[test]
    fn payment_summary_directs_payments_to_payer() {
        let people = participants(&["Alice", "Bob", "Charlie"]);
        let items = vec![
            assigned(
                ReceiptItem::new("Pizza", 1, Money::from_pence(1300)),
                ItemAssignment::individual(&people[0].id),
            ),
            assigned(
                ReceiptItem::new("Burger", 1, Money::from_pence(1300)),
                ItemAssignment::individual(&people[1].id),
            ),
            assigned(
                ReceiptItem::new("Salad", 1, Money::from_pence(1100)),
                ItemAssignment::individual(&people[2].id),
            ),
        ];

        let summary = BillSplitSummary::calculate(
            &people,
            &items,
            Money::zero(),
            Some(people[0].id.clone()),
        );
        let payment = summary.payment_summary().unwrap();

        assert_eq!(payment.payer.id, people[0].id);
        assert_eq!(payment.total_bill_amount, Money::from_pence(3700));
        assert_eq!(payment.payer_owes, Money::from_pence(1300));
        assert_eq!(payment.payments.len(), 2);
        assert_eq!(payment.payments[0].from.id, people[1].id);
        assert_eq!(payment.payments[0].to.id, people[0].id);
        assert_eq!(payment.payments[0].amount, Money::from_pence(1300));
        assert_eq!(payment.payments[1].from.id, people[2].id);
        assert_eq!(payment.payments[1].amount, Money::from_pence(1100));
    }

    #[test]
    fn payment_summary_skips_zero_balances() {
        let people = participants(&["Alice", "Bob"]);
        let items = vec![assigned(
            ReceiptItem::new("Pizza", 1, Money::from_pence(1300)),
            ItemAssignment::individual(&people[0].id),
        )];

        let summary = BillSplitSummary::calculate(
            &people,
            &items,
            Money::zero(),
            Some(people[0].id.clone()),
        );
        let payment = summary.payment_summary().unwrap();

        // Bob owes nothing, so no payment line for him.
        assert!(payment.payments.is_empty());
    }

    #[test]
    fn payment_summary_none_without_payer() {
        let people = participants(&["Alice"]);
        let summary = BillSplitSummary::calculate(&people, &[], Money::zero(), None);
        assert!(summary.payment_summary().is_none());
    }

    #[test]
    fn payment_summary_none_for_unknown_payer() {
        let people = participants(&["Alice"]);
        let summary = BillSplitSummary::calculate(
            &people,
            &[],
            Money::zero(),
            Some("ghost".to_string()),
        );
        assert!(summary.payment_summary().is_none());
    }

    #[test]
    fn balance_totals_equal_assigned_plus_service() {
        let people = participants(&["A", "B", "C"]);
        let ids: Vec<String> = people.iter().map(|p| p.id.clone()).collect();
        let items = vec![
            assigned(
                ReceiptItem::new("Platter", 1, Money::from_pence(1999)),
                ItemAssignment::equal_split(ids.clone()),
            ),
            assigned(
                ReceiptItem::new("Wine", 1, Money::from_pence(2501)),
                ItemAssignment::equal_split(vec![ids[0].clone(), ids[2].clone()]),
            ),
            assigned(
                ReceiptItem::new("Espresso", 1, Money::from_pence(301)),
                ItemAssignment::individual(&ids[1]),
            ),
            // Service is still fully distributed even with a line unassigned.
            AssignedReceiptItem::unassigned(ReceiptItem::new(
                "Bread",
                1,
                Money::from_pence(450),
            )),
        ];
        let service = Money::from_pence(553);

        let summary = BillSplitSummary::calculate(&people, &items, service, None);

        let balance_total: Money = summary.balances.iter().map(|b| b.total).sum();
        assert_eq!(balance_total, summary.total_assigned + service);
    }
}
