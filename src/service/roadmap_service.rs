use crate::errors::AppError;
use crate::models::{NodeKind, NodeStyle, Position, Roadmap, RoadmapEdge, RoadmapNode};

pub const MIN_HOURS_PER_DAY: u32 = 1;
pub const MAX_HOURS_PER_DAY: u32 = 24;

const ACCENT: &str = "#007AFF";
const SUCCESS: &str = "#34C759";

/// Vertical distance between consecutive topic rows.
const ROW_SPACING: i32 = 150;
const FIRST_TOPIC_Y: i32 = 200;
const TOPIC_X_OFFSET: i32 = 200;

struct Topic {
    label: &'static str,
    hours: u32,
    details: &'static str,
}

const TOPICS: [Topic; 7] = [
    Topic {
        label: "Research",
        hours: 20,
        details: "Market analysis, competitor research, identify target audience",
    },
    Topic {
        label: "Planning",
        hours: 15,
        details: "Define MVP features, create project timeline, allocate resources",
    },
    Topic {
        label: "Design",
        hours: 30,
        details: "UI/UX design, wireframing, prototyping, user testing",
    },
    Topic {
        label: "Development",
        hours: 80,
        details: "Frontend and backend implementation, database setup, API integration",
    },
    Topic {
        label: "Testing",
        hours: 25,
        details: "Unit testing, integration testing, user acceptance testing",
    },
    Topic {
        label: "Deployment",
        hours: 10,
        details: "Server setup, CI/CD pipeline, monitoring tools implementation",
    },
    Topic {
        label: "Marketing",
        hours: 30,
        details: "Launch strategy, content creation, social media campaigns",
    },
];

fn style(background: &str, color: &str, border: &str, width: u32) -> NodeStyle {
    NodeStyle {
        background: background.to_string(),
        color: color.to_string(),
        border: format!("1px solid {border}"),
        width,
    }
}

fn edge(source: &str, target: &str, stroke: &str) -> RoadmapEdge {
    RoadmapEdge {
        id: format!("e{source}-{target}"),
        source: source.to_string(),
        target: target.to_string(),
        animated: true,
        stroke: stroke.to_string(),
    }
}

/// Lays out the fixed SaaS roadmap for `goal`: a start node, the goal, one
/// node per topic alternating left and right, and a completion node carrying
/// the total number of days at `hours_per_day`.
pub fn generate_roadmap(goal: &str, hours_per_day: u32) -> Result<Roadmap, AppError> {
    let goal = goal.trim();
    if goal.is_empty() {
        return Err(AppError::EmptyField { field_name: "goal".to_string() });
    }
    if !(MIN_HOURS_PER_DAY..=MAX_HOURS_PER_DAY).contains(&hours_per_day) {
        return Err(AppError::OutOfRange {
            field_name: "hoursPerDay".to_string(),
            min: MIN_HOURS_PER_DAY,
            max: MAX_HOURS_PER_DAY,
            actual: hours_per_day,
        });
    }

    let mut nodes = vec![
        RoadmapNode {
            id: "1".to_string(),
            kind: NodeKind::Start,
            title: "Start".to_string(),
            lines: vec!["Begin your SaaS journey".to_string()],
            position: Position { x: 0, y: 0 },
            style: style("#E5E5EA", "#000", "#000", 180),
        },
        RoadmapNode {
            id: "2".to_string(),
            kind: NodeKind::Goal,
            title: goal.to_string(),
            lines: vec!["Your SaaS project goal".to_string()],
            position: Position { x: 0, y: 100 },
            style: style(ACCENT, "#fff", ACCENT, 180),
        },
    ];
    let mut edges = vec![edge("1", "2", ACCENT)];

    let mut y = FIRST_TOPIC_Y;
    let mut total_days = 0;
    for (i, topic) in TOPICS.iter().enumerate() {
        let id = (i + 3).to_string();
        let days = topic.hours.div_ceil(hours_per_day);
        total_days += days;

        nodes.push(RoadmapNode {
            id: id.clone(),
            kind: NodeKind::Topic,
            title: topic.label.to_string(),
            lines: vec![
                format!("Time: {days} days"),
                format!("Hours: {}", topic.hours),
                topic.details.to_string(),
            ],
            position: Position {
                x: if i % 2 == 0 { -TOPIC_X_OFFSET } else { TOPIC_X_OFFSET },
                y,
            },
            style: style("#F2F2F7", "#000", "#000", 200),
        });
        edges.push(edge(&(i + 2).to_string(), &id, ACCENT));
        y += ROW_SPACING;
    }

    let last_topic = (TOPICS.len() + 2).to_string();
    let complete = (TOPICS.len() + 3).to_string();
    nodes.push(RoadmapNode {
        id: complete.clone(),
        kind: NodeKind::Complete,
        title: "Complete".to_string(),
        lines: vec![
            format!("Total time: {total_days} days"),
            "Launch your SaaS!".to_string(),
        ],
        position: Position { x: 0, y },
        style: style(SUCCESS, "#fff", SUCCESS, 180),
    });
    edges.push(edge(&last_topic, &complete, SUCCESS));

    Ok(Roadmap { nodes, edges, total_days })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_hours_a_day_takes_fifty_five_days() {
        let roadmap = generate_roadmap("Build a SaaS product", 4).unwrap();
        assert_eq!(roadmap.total_days, 55);

        let research = &roadmap.nodes[2];
        assert_eq!(research.title, "Research");
        assert_eq!(research.lines[0], "Time: 5 days");
        assert_eq!(research.lines[1], "Hours: 20");

        let complete = roadmap.nodes.last().unwrap();
        assert_eq!(complete.id, "10");
        assert_eq!(complete.kind, NodeKind::Complete);
        assert_eq!(complete.lines[0], "Total time: 55 days");
    }

    #[test]
    fn days_round_up_per_topic() {
        let roadmap = generate_roadmap("Learn Go", 24).unwrap();
        let days: Vec<&str> = roadmap.nodes[2..9].iter().map(|n| n.lines[0].as_str()).collect();
        assert_eq!(
            days,
            [
                "Time: 1 days",
                "Time: 1 days",
                "Time: 2 days",
                "Time: 4 days",
                "Time: 2 days",
                "Time: 1 days",
                "Time: 2 days",
            ]
        );
        assert_eq!(roadmap.total_days, 13);
    }

    #[test]
    fn layout_alternates_sides_and_chains_edges() {
        let roadmap = generate_roadmap("  Learn Go  ", 8).unwrap();
        assert_eq!(roadmap.nodes.len(), 10);
        assert_eq!(roadmap.nodes[1].title, "Learn Go");

        let xs: Vec<i32> = roadmap.nodes[2..9].iter().map(|n| n.position.x).collect();
        assert_eq!(xs, [-200, 200, -200, 200, -200, 200, -200]);
        assert_eq!(roadmap.nodes[2].position.y, 200);
        assert_eq!(roadmap.nodes[8].position.y, 1100);
        assert_eq!(roadmap.nodes[9].position, Position { x: 0, y: 1250 });

        let ids: Vec<&str> = roadmap.edges.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(
            ids,
            ["e1-2", "e2-3", "e3-4", "e4-5", "e5-6", "e6-7", "e7-8", "e8-9", "e9-10"]
        );
        assert_eq!(roadmap.edges.last().unwrap().stroke, SUCCESS);
        assert!(roadmap.edges.iter().all(|e| e.animated));
    }

    #[test]
    fn rejects_blank_goal_and_out_of_range_hours() {
        assert!(matches!(
            generate_roadmap("   ", 4),
            Err(AppError::EmptyField { .. })
        ));
        assert!(matches!(
            generate_roadmap("Learn Go", 0),
            Err(AppError::OutOfRange { actual: 0, .. })
        ));
        assert!(matches!(
            generate_roadmap("Learn Go", 25),
            Err(AppError::OutOfRange { actual: 25, .. })
        ));
    }
}
