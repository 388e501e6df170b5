//! Hand histories used by the tests of several modules.

/// Cutoff open raise, small blind folds, big blind calls and folds to a
/// continuation bet.
pub const HOLDEM_STEAL: &str = "PokerStars Hand #230000000001:  Hold'em No Limit ($0.01/$0.02 USD) - 2023/05/14 13:24:56 CET [2023/05/14 7:24:56 ET]
Table 'Alcyone IV' 6-max Seat #5 is the button
Seat 1: alice ($2 in chips)
Seat 2: bob ($2 in chips)
Seat 3: carol ($2 in chips)
Seat 4: dave ($2 in chips)
Seat 5: erin ($2 in chips)
Seat 6: frank ($2 in chips)
frank: posts small blind $0.01
alice: posts big blind $0.02
*** HOLE CARDS ***
Dealt to dave [Ah Kd]
bob: folds
carol: folds
dave: raises $0.04 to $0.06
erin: folds
frank: folds
alice: calls $0.04
*** FLOP *** [2c 7d Jh]
alice: checks
dave: bets $0.08
alice: folds
Uncalled bet ($0.08) returned to dave
dave collected $0.13 from pot
dave: doesn't show hand
*** SUMMARY ***
Total pot $0.13 | Rake $0
Board [2c 7d Jh]
Seat 1: alice (big blind) folded on the Flop
Seat 2: bob folded before Flop (didn't bet)
Seat 3: carol folded before Flop (didn't bet)
Seat 4: dave collected ($0.13)
Seat 5: erin (button) folded before Flop (didn't bet)
Seat 6: frank (small blind) folded before Flop";

/// Antes, a short stack all-in, an uncalled side bet and a showdown.
pub const TOURNAMENT_ALL_IN: &str = "PokerStars Hand #230000000002: Tournament #3500000001, $1.40+$0.10 USD Hold'em No Limit - Level II (15/30) - 2023/01/14 20:00:00 CET [2023/01/14 14:00:00 ET]
Table '3500000001 7' 9-max Seat #1 is the button
Seat 1: ann (1500 in chips)
Seat 2: ben (400 in chips)
Seat 3: cat (1500 in chips)
Seat 4: dan (1500 in chips) is sitting out
ann: posts the ante 5
ben: posts the ante 5
cat: posts the ante 5
ben: posts small blind 15
cat: posts big blind 30
*** HOLE CARDS ***
Dealt to ann [Qs Qh]
ann: raises 60 to 90
ben: raises 305 to 395 and is all-in
cat: calls 365
ann: calls 305
*** FLOP *** [2h 5c 9d]
cat: checks
ann: bets 200
cat: folds
Uncalled bet (200) returned to ann
*** TURN *** [2h 5c 9d] [Kd]
*** RIVER *** [2h 5c 9d Kd] [3s]
*** SHOW DOWN ***
ann: shows [Qs Qh] (a pair of Queens)
ben: shows [Ac Kc] (a pair of Kings)
ben collected 1200 from pot
*** SUMMARY ***
Total pot 1200 | Rake 0
Board [2h 5c 9d Kd 3s]
Seat 1: ann (button) showed [Qs Qh] and lost with a pair of Queens
Seat 2: ben (small blind) showed [Ac Kc] and won (1200) with a pair of Kings
Seat 3: cat (big blind) folded on the Flop";

/// Razz with antes, a bring-in, a completion and a reraise.
pub const RAZZ: &str = "PokerStars Hand #230000000003:  Razz Limit ($0.04/$0.08 USD) - 2023/05/14 13:30:00 CET [2023/05/14 7:30:00 ET]
Table 'Thalia' 8-max
Seat 1: pat ($1 in chips)
Seat 2: quinn ($1 in chips)
Seat 3: rose ($1 in chips)
pat: posts the ante $0.01
quinn: posts the ante $0.01
rose: posts the ante $0.01
*** 3rd STREET ***
Dealt to pat [2c 3d 4h]
Dealt to quinn [Kc]
Dealt to rose [8s]
quinn: brings in for $0.02
rose: completes it to $0.04
pat: raises $0.04 to $0.08
quinn: folds
rose: calls $0.04
*** 4th STREET ***
Dealt to pat [2c 3d 4h] [5s]
Dealt to rose [8s] [Qd]
pat: bets $0.04
rose: folds
Uncalled bet ($0.04) returned to pat
pat collected $0.21 from pot
pat: doesn't show hand
*** SUMMARY ***
Total pot $0.21 | Rake $0
Seat 1: pat collected ($0.21)
Seat 2: quinn folded on the 3rd Street
Seat 3: rose folded on the 4th Street";

/// Triple draw with discards, a pat hand and rake.
pub const TRIPLE_DRAW: &str = "PokerStars Hand #230000000004:  Triple Draw 2-7 Lowball Limit ($0.10/$0.20 USD) - 2023/05/14 13:40:00 CET [2023/05/14 7:40:00 ET]
Table 'Kleopatra' 6-max Seat #1 is the button
Seat 1: sam ($5 in chips)
Seat 2: tia ($5 in chips)
Seat 3: uma ($5 in chips)
tia: posts small blind $0.05
uma: posts big blind $0.10
*** DEALING HANDS ***
Dealt to sam [2c 3d 4h 5s Kc]
sam: raises $0.10 to $0.20
tia: folds
uma: calls $0.10
*** FIRST DRAW ***
uma: discards 2 cards
sam: discards 1 card [Kc]
Dealt to sam [2c 3d 4h 5s] [7d]
uma: bets $0.10
sam: raises $0.10 to $0.20
uma: calls $0.10
*** SECOND DRAW ***
uma: stands pat
sam: stands pat on [2c 3d 4h 5s 7d]
uma: checks
sam: bets $0.20
uma: folds
Uncalled bet ($0.20) returned to sam
sam collected $0.81 from pot
*** SUMMARY ***
Total pot $0.85 | Rake $0.04
Seat 1: sam (button) collected ($0.81)
Seat 2: tia (small blind) folded before the Draw
Seat 3: uma (big blind) folded after the 2nd Draw";

/// A short session: two hands, a line of noise and the first hand again.
pub fn session() -> String {
    [HOLDEM_STEAL, "Some stray text from a broken export", RAZZ, HOLDEM_STEAL].join("\n\n\n")
}
