//! Built-in catalog used offline and by the payment and confirmation pages.
//!
//! The seed colleges are also what the backend inserts into an empty
//! database, so offline and online browsing show the same institutions.

use crate::net::types::{College, Event};

#[allow(clippy::too_many_arguments)]
fn event(
    id: i64,
    title: &str,
    organizer: &str,
    date: &str,
    location: &str,
    category: &str,
    participants: i64,
    price: f64,
    image: &str,
    description: &str,
) -> Event {
    Event {
        id,
        title: title.to_owned(),
        description: description.to_owned(),
        organizer: organizer.to_owned(),
        date: date.to_owned(),
        location: location.to_owned(),
        price,
        image: Some(image.to_owned()),
        category: category.to_owned(),
        participants,
        college_id: None,
        college_name: None,
    }
}

/// Events listed on the Events page.
#[must_use]
pub fn events() -> Vec<Event> {
    vec![
        event(
            1,
            "National Hackathon 2023",
            "Tech University",
            "Dec 15-17, 2023",
            "Virtual Event",
            "Tech",
            850,
            499.0,
            "https://images.unsplash.com/photo-1540575467063-178a50c2df87?q=80&w=1740&auto=format&fit=crop",
            "Join the biggest national hackathon of the year! Teams of up to 4 students will compete to build \
             innovative solutions for real-world problems. This 48-hour coding marathon will test your skills, \
             creativity, and teamwork.",
        ),
        event(
            2,
            "Business Case Competition",
            "Business School",
            "Dec 20, 2023",
            "New Delhi",
            "Academic",
            320,
            299.0,
            "https://images.unsplash.com/photo-1552664730-d307ca884978?q=80&w=1740&auto=format&fit=crop",
            "Tackle real-world business challenges from top companies. Present your solutions to industry experts \
             and win exciting prizes. Great opportunity to network with professionals and showcase your analytical \
             skills.",
        ),
        event(
            3,
            "Design Festival 2023",
            "Creative Arts College",
            "Jan 5-7, 2024",
            "Mumbai",
            "Arts",
            500,
            399.0,
            "https://images.unsplash.com/photo-1505373877841-8d25f7d46678?q=80&w=1712&auto=format&fit=crop",
            "A three-day celebration of design in all its forms - UI/UX, graphic design, industrial design, and \
             more. Attend workshops by design leaders, showcase your portfolio, and connect with creative minds \
             from across the country.",
        ),
        event(
            4,
            "Science Symposium",
            "National Science Academy",
            "Jan 12-14, 2024",
            "Bangalore",
            "Academic",
            420,
            249.0,
            "https://images.unsplash.com/photo-1507413245164-6160d8298b31?q=80&w=1740&auto=format&fit=crop",
            "An annual gathering of science enthusiasts from various disciplines. Present your research, attend \
             keynote speeches, and participate in interactive sessions to deepen your understanding of \
             cutting-edge scientific developments.",
        ),
        event(
            5,
            "Cultural Fest 2024",
            "University of Arts",
            "Feb 2-5, 2024",
            "Hyderabad",
            "Cultural",
            1200,
            199.0,
            "https://images.unsplash.com/photo-1501281668745-f7f57925c3b4?q=80&w=1740&auto=format&fit=crop",
            "Celebrate diversity through music, dance, art, and food at the largest cultural festival in India. \
             Showcase your talents, participate in competitions, and immerse yourself in various cultural \
             experiences.",
        ),
        event(
            6,
            "Robotics Workshop",
            "Engineering Institute",
            "Feb 10, 2024",
            "Chennai",
            "Tech",
            150,
            599.0,
            "https://images.unsplash.com/photo-1562408590-e32931084e23?q=80&w=1740&auto=format&fit=crop",
            "Hands-on workshop on building and programming robots. Learn about various sensors, actuators, and \
             control systems. Perfect for engineering students looking to enhance their practical skills.",
        ),
    ]
}

/// Events the payment and confirmation pages can resolve by id.
#[must_use]
pub fn featured_events() -> Vec<Event> {
    events().into_iter().take(3).collect()
}

/// Category options on the Events page, `All` first.
pub const EVENT_CATEGORIES: [&str; 6] = ["All", "Tech", "Academic", "Cultural", "Arts", "Sports"];

/// Location options on the Events page, `All` first.
pub const EVENT_LOCATIONS: [&str; 7] = ["All", "Virtual Event", "Delhi", "Mumbai", "Bangalore", "Hyderabad", "Chennai"];

struct CollegeSeed {
    name: &'static str,
    short_name: &'static str,
    location: &'static str,
    state: &'static str,
    website: &'static str,
    email: &'static str,
    phone: &'static str,
    description: &'static str,
    established_year: i32,
    college_type: &'static str,
    affiliation: &'static str,
}

const COLLEGE_SEEDS: [CollegeSeed; 10] = [
    CollegeSeed {
        name: "Indian Institute of Technology Delhi",
        short_name: "IIT Delhi",
        location: "Hauz Khas, New Delhi",
        state: "Delhi",
        website: "https://www.iitd.ac.in",
        email: "info@iitd.ac.in",
        phone: "+91-11-2659-1938",
        description: "Premier engineering and technology institute",
        established_year: 1961,
        college_type: "Engineering",
        affiliation: "IIT System",
    },
    CollegeSeed {
        name: "Indian Institute of Technology Bombay",
        short_name: "IIT Bombay",
        location: "Powai, Mumbai",
        state: "Maharashtra",
        website: "https://www.iitb.ac.in",
        email: "info@iitb.ac.in",
        phone: "+91-22-2572-2545",
        description: "Leading technical education and research institute",
        established_year: 1958,
        college_type: "Engineering",
        affiliation: "IIT System",
    },
    CollegeSeed {
        name: "Indian Institute of Science",
        short_name: "IISc Bangalore",
        location: "Bangalore",
        state: "Karnataka",
        website: "https://www.iisc.ac.in",
        email: "info@iisc.ac.in",
        phone: "+91-80-2293-2001",
        description: "Premier institute for advanced scientific and technological research",
        established_year: 1909,
        college_type: "Science & Research",
        affiliation: "Autonomous",
    },
    CollegeSeed {
        name: "Delhi University",
        short_name: "DU",
        location: "Delhi",
        state: "Delhi",
        website: "https://www.du.ac.in",
        email: "info@du.ac.in",
        phone: "+91-11-2766-7077",
        description: "One of India's largest universities",
        established_year: 1922,
        college_type: "University",
        affiliation: "Central University",
    },
    CollegeSeed {
        name: "Jawaharlal Nehru University",
        short_name: "JNU",
        location: "New Delhi",
        state: "Delhi",
        website: "https://www.jnu.ac.in",
        email: "info@jnu.ac.in",
        phone: "+91-11-2670-4000",
        description: "Premier university for social sciences and humanities",
        established_year: 1969,
        college_type: "University",
        affiliation: "Central University",
    },
    CollegeSeed {
        name: "Indian Institute of Technology Madras",
        short_name: "IIT Madras",
        location: "Chennai",
        state: "Tamil Nadu",
        website: "https://www.iitm.ac.in",
        email: "info@iitm.ac.in",
        phone: "+91-44-2257-4000",
        description: "Leading engineering and technology institute",
        established_year: 1959,
        college_type: "Engineering",
        affiliation: "IIT System",
    },
    CollegeSeed {
        name: "Banaras Hindu University",
        short_name: "BHU",
        location: "Varanasi",
        state: "Uttar Pradesh",
        website: "https://www.bhu.ac.in",
        email: "info@bhu.ac.in",
        phone: "+91-542-230-7000",
        description: "One of the largest residential universities in Asia",
        established_year: 1916,
        college_type: "University",
        affiliation: "Central University",
    },
    CollegeSeed {
        name: "Anna University",
        short_name: "Anna Univ",
        location: "Chennai",
        state: "Tamil Nadu",
        website: "https://www.annauniv.edu",
        email: "info@annauniv.edu",
        phone: "+91-44-2235-8000",
        description: "Technical university in Tamil Nadu",
        established_year: 1978,
        college_type: "Engineering",
        affiliation: "State University",
    },
    CollegeSeed {
        name: "Jadavpur University",
        short_name: "JU",
        location: "Kolkata",
        state: "West Bengal",
        website: "https://www.jaduniv.edu.in",
        email: "info@jaduniv.edu.in",
        phone: "+91-33-2414-6666",
        description: "Premier university known for engineering and arts",
        established_year: 1955,
        college_type: "University",
        affiliation: "State University",
    },
    CollegeSeed {
        name: "Manipal Institute of Technology",
        short_name: "MIT Manipal",
        location: "Manipal",
        state: "Karnataka",
        website: "https://www.manipal.edu",
        email: "info@manipal.edu",
        phone: "+91-820-292-3000",
        description: "Leading private engineering institute",
        established_year: 1957,
        college_type: "Engineering",
        affiliation: "Deemed University",
    },
];

/// The ten seed colleges, numbered from 1 in listing order.
#[must_use]
pub fn colleges() -> Vec<College> {
    COLLEGE_SEEDS
        .iter()
        .zip(1_i64..)
        .map(|(seed, id)| College {
            id,
            name: seed.name.to_owned(),
            short_name: seed.short_name.to_owned(),
            location: seed.location.to_owned(),
            state: seed.state.to_owned(),
            website: Some(seed.website.to_owned()),
            email: Some(seed.email.to_owned()),
            phone: Some(seed.phone.to_owned()),
            logo_url: None,
            description: Some(seed.description.to_owned()),
            established_year: Some(seed.established_year),
            college_type: Some(seed.college_type.to_owned()),
            affiliation: Some(seed.affiliation.to_owned()),
        })
        .collect()
}
