use chrono::{DateTime, Duration, Utc};

use crate::features::tickets::models::{Ticket, TicketStatus, Urgency};

/// Demo tickets a session can start with, dated relative to `now`
pub fn sample_tickets(now: DateTime<Utc>) -> Vec<Ticket> {
    vec![
        Ticket {
            id: "T-1001".to_string(),
            requester_name: "สมชาย ใจดี".to_string(),
            department: "บัญชี".to_string(),
            device_type: "Laptop Dell XPS".to_string(),
            description: "เปิดเครื่องไม่ติด ไฟสถานะกระพริบสีส้ม".to_string(),
            status: TicketStatus::Pending,
            urgency: Urgency::High,
            created_at: now - Duration::days(2),
            ai_diagnosis: Some("อาจเกิดจากปัญหา Power Supply หรือ Mainboard".to_string()),
            ai_category: Some("Hardware".to_string()),
            image: None,
        },
        Ticket {
            id: "T-1002".to_string(),
            requester_name: "วิภาดา รักงาน".to_string(),
            department: "HR".to_string(),
            device_type: "PC Desktop".to_string(),
            description: "เข้าอินเทอร์เน็ตไม่ได้ แต่โปรแกรมอื่นใช้งานได้ปกติ".to_string(),
            status: TicketStatus::InProgress,
            urgency: Urgency::Medium,
            created_at: now - Duration::days(1),
            ai_diagnosis: Some("น่าจะเกิดจาก DNS หรือการตั้งค่า Proxy".to_string()),
            ai_category: Some("Network".to_string()),
            image: None,
        },
        Ticket {
            id: "T-1003".to_string(),
            requester_name: "ก้องภพ จอมเทคนิค".to_string(),
            department: "การตลาด".to_string(),
            device_type: "Printer Canon".to_string(),
            description: "กระดาษติดบ่อยมาก พิมพ์ไม่ออก".to_string(),
            status: TicketStatus::Completed,
            urgency: Urgency::Low,
            created_at: now - Duration::days(5),
            ai_diagnosis: None,
            ai_category: Some("Peripheral".to_string()),
            image: None,
        },
    ]
}
