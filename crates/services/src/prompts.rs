//! Builders for the instruction line shown above the equation.

use sums_core::model::{Level, PASSING_SCORE, Problem, TOTAL_ROUNDS};

/// Start-screen greeting.
#[must_use]
pub fn ready() -> String {
    "准备好了吗？".to_string()
}

/// Opening prompt for a fresh round.
#[must_use]
pub fn round_opening(level: Level) -> String {
    match level {
        Level::Carry => "个位加个位，满十要进一哦！".to_string(),
        Level::Basic => "我们先算个位数：".to_string(),
    }
}

/// Shown while the carry animation plays.
#[must_use]
pub fn carry_animation() -> String {
    "个位满十啦！把10个一变成1个十 🎈".to_string()
}

/// Prompt for the tens column, spelling out the carry when present.
#[must_use]
pub fn tens_prompt(problem: &Problem) -> String {
    let (t1, t2) = (problem.tens1(), problem.tens2());
    if problem.has_carry() {
        format!("进位1！现在算十位：{t1} + {t2} + 1 = ?")
    } else {
        format!("算对啦！现在算十位：{t1} + {t2} = ?")
    }
}

/// Nudge after a wrong tens answer.
#[must_use]
pub fn tens_retry(carried: bool) -> String {
    if carried {
        "十位数算错啦，别忘了加上进位的1哦！".to_string()
    } else {
        "十位数再算算看？".to_string()
    }
}

/// Celebration once the round is solved.
#[must_use]
pub fn round_complete(total: u8) -> String {
    format!("太棒了！答案是 {total} 🎉")
}

/// Summary headline for a finished level.
#[must_use]
pub fn summary(score: u8, passed: bool) -> String {
    let headline = if passed {
        "🎉 闯关成功！"
    } else {
        "💪 继续加油！"
    };
    format!("{headline} 答对 {score} / {TOTAL_ROUNDS} 题 {}", stars(score))
}

/// Star rating shown on the summary screen.
#[must_use]
pub fn stars(score: u8) -> &'static str {
    if score >= TOTAL_ROUNDS {
        "🌟🌟🌟"
    } else if score >= PASSING_SCORE {
        "🌟🌟"
    } else {
        "🌟"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tens_prompt_spells_out_the_carry() {
        let carry = Problem::new(18, 35).unwrap();
        assert_eq!(tens_prompt(&carry), "进位1！现在算十位：1 + 3 + 1 = ?");

        let plain = Problem::new(22, 13).unwrap();
        assert_eq!(tens_prompt(&plain), "算对啦！现在算十位：2 + 1 = ?");
    }

    #[test]
    fn star_rating_tiers() {
        assert_eq!(stars(5), "🌟🌟🌟");
        assert_eq!(stars(4), "🌟🌟");
        assert_eq!(stars(3), "🌟🌟");
        assert_eq!(stars(2), "🌟");
        assert_eq!(stars(0), "🌟");
    }

    #[test]
    fn summary_reports_score() {
        assert!(summary(4, true).contains("答对 4 / 5 题"));
        assert!(summary(2, false).contains("继续加油"));
    }
}
